use crate::catalog::types::SemanticType;

/// Java type holding a column of the given semantic kind.
///
/// Unmapped kinds render as the raw catalog name.
pub fn java_type(semantic: &SemanticType) -> &str {
    match semantic {
        SemanticType::Date => "LocalDate",
        SemanticType::DateTime => "LocalDateTime",
        SemanticType::Text => "String",
        SemanticType::Int64 => "Long",
        SemanticType::Int32 => "Integer",
        SemanticType::Boolean => "Boolean",
        SemanticType::Decimal => "BigDecimal",
        SemanticType::Unmapped(raw) => raw,
    }
}

/// Java type for a catalog type name.
pub fn java_type_of(type_name: &str) -> String {
    java_type(&SemanticType::from_catalog(type_name)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_types_map_to_java_types() {
        assert_eq!(java_type_of("DATE"), "LocalDate");
        assert_eq!(java_type_of("TIMESTAMP"), "LocalDateTime");
        assert_eq!(java_type_of("VARGRAPHIC"), "String");
        assert_eq!(java_type_of("CLOB"), "String");
        assert_eq!(java_type_of("BIGINT"), "Long");
        assert_eq!(java_type_of("INTEGER"), "Integer");
        assert_eq!(java_type_of("BOOLEAN"), "Boolean");
        assert_eq!(java_type_of("DECIMAL"), "BigDecimal");
    }

    #[test]
    fn unmapped_types_pass_through_unchanged() {
        assert_eq!(java_type_of("XML"), "XML");
    }
}
