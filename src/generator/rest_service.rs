use std::fmt::{self, Write};

use crate::classifier::relations::TableWithRelation;
use crate::config::GeneratorConfig;
use crate::generator::java_source::write_preamble;
use crate::generator::java_types::java_type;
use crate::naming::{camel_to_hyphen, capitalize_first, lowercase_first};

/// Resource path of a REST service: the hyphenated type name.
pub fn resource_path(type_name: &str) -> String {
    format!("/{}", camel_to_hyphen(type_name))
}

/// Render the REST service for `table`.
///
/// Returns `None` when the table has no single-column key.
pub fn render_rest_service(
    table: &TableWithRelation,
    config: &GeneratorConfig,
) -> Result<Option<String>, fmt::Error> {
    let Some(id) = &table.id else {
        return Ok(None);
    };
    let entity = table.type_name.as_str();
    let id_type = java_type(&id.semantic_type);
    let repository = format!("{}Repository", lowercase_first(entity));
    let id_getter = format!("get{}", capitalize_first(&id.field_name));
    let context = "RequestContext<Map<String, List<String>>>";

    let mut out = String::new();
    write_preamble(&mut out, config.sub_package("restservice").as_deref())?;
    for import in [
        "java.util.List",
        "java.util.Map",
        "java.util.Optional",
        "",
        "org.springframework.beans.factory.annotation.Autowired",
        "org.springframework.stereotype.Service",
        "org.springframework.transaction.annotation.Transactional",
        "",
        "com.fasterxml.jackson.databind.JsonNode",
        "",
    ] {
        if import.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "import {import};")?;
        }
    }
    if let (Some(entity_package), Some(repository_package)) =
        (config.sub_package("entity"), config.sub_package("repository"))
    {
        writeln!(out, "import {entity_package}.{entity};")?;
        writeln!(out, "import {repository_package}.{entity}Repository;")?;
    }
    let api = &config.api_package;
    writeln!(out, "import {api}.RequestContext;")?;
    writeln!(out, "import {api}.RestfulOperationFlags;")?;
    writeln!(out, "import {api}.RestfulService;")?;
    writeln!(out)?;

    write!(
        out,
        r#"@Service
public class {entity}RestService implements RestfulService<{id_type}, {entity}Dto, Map<String, List<String>>> {{

    {entity}Repository {repository};
    DtoToEntityMapper dtoToEntityMapper;

    @Autowired
    public {entity}RestService({entity}Repository {repository}, DtoToEntityMapper dtoToEntityMapper) {{
        this.{repository} = {repository};
        this.dtoToEntityMapper = dtoToEntityMapper;
    }}

    @Override
    public RestfulOperationFlags getSupportedRestfulOperation() {{
        RestfulOperationFlags flags = new RestfulOperationFlags();
        flags.set(RestfulOperationFlags.DELETE_BY_ID);
        flags.set(RestfulOperationFlags.PUT_BY_ID);
        flags.set(RestfulOperationFlags.POST);
        flags.set(RestfulOperationFlags.PATCH_BY_ID);
        return flags;
    }}

    @Override
    public String getBaseResourceRelativePath() {{
        return "{path}";
    }}

    @Override
    @Transactional
    public void putById({context} context, {id_type} id, {entity}Dto model) throws Exception {{
        {entity} entity = {repository}.findById(id).orElseThrow(RuntimeException::new);
        dtoToEntityPipeEntityManagerPersist(model, entity);
    }}

    @Override
    @Transactional
    public {id_type} post({context} context, {entity}Dto model) throws Exception {{
        {entity} entity = new {entity}();
        dtoToEntityPipeEntityManagerPersist(model, entity);
        return entity.{id_getter}();
    }}

    @Override
    @Transactional
    public void patchById({context} context, {id_type} id, JsonNode node) throws Exception {{
        {entity} entity = {repository}.findById(id).orElseThrow(RuntimeException::new);
        jsonNodeToEntityPipeEntityManagerPersist(node, entity);
    }}

    @Override
    @Transactional
    public boolean deleteById({context} context, {id_type} id) throws Exception {{
        Optional<{entity}> found = {repository}.findById(id);
        if (found.isPresent()) {{
            {repository}.delete(found.get());
            return true;
        }}
        return false;
    }}

    void dtoToEntityPipeEntityManagerPersist({entity}Dto dto, {entity} entity) throws Exception {{
        dtoToEntity(dto, entity);
        {repository}.save(entity);
        sideEffect(entity);
    }}

    void jsonNodeToEntityPipeEntityManagerPersist(JsonNode node, {entity} entity) throws Exception {{
        jsonToEntity(node, entity);
        {repository}.save(entity);
        sideEffect(entity);
    }}

    public void sideEffect({entity} entity) throws Exception {{}}

    public void dtoToEntity({entity}Dto dto, {entity} entity) {{
        dtoToEntityMapper.mapDtoToEntity(dto, entity);
    }}

    public void jsonToEntity(JsonNode node, {entity} entity) {{
        dtoToEntityMapper.mapJsonToEntity(node, entity);
    }}
}}
"#,
        path = resource_path(entity),
    )?;
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_path_hyphenates_the_type_name() {
        assert_eq!(resource_path("OrderItem"), "/order-item");
        assert_eq!(resource_path("Order"), "/order");
    }
}
