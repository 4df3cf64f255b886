//! MCP tool definitions

use serde::Deserialize;
use serde_json::json;

use super::protocol::ToolDefinition;

pub const GENERATE_AFFILIATE_LINK: &str = "generate_affiliate_link";
pub const GENERATE_AFFILIATE_HTML: &str = "generate_affiliate_html";

const PRODUCT_ARGS_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "url": {"type": "string", "description": "Amazon product page URL"},
        "tag": {"type": "string", "description": "Affiliate tag (optional, defaults to AMAZON_AFFILIATE_TAG)"}
    },
    "required": ["url"]
}"#;

/// All tool definitions as (name, description, input schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        GENERATE_AFFILIATE_LINK,
        "Convert an Amazon product URL into an affiliate link",
        PRODUCT_ARGS_SCHEMA,
    ),
    (
        GENERATE_AFFILIATE_HTML,
        "Generate an embeddable HTML card with the affiliate link and the product image",
        PRODUCT_ARGS_SCHEMA,
    ),
];

/// Arguments shared by both tools, validated before the core is invoked
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductLinkArgs {
    pub url: String,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_parse() {
        for (name, _, schema) in TOOL_DEFINITIONS {
            let parsed: serde_json::Value = serde_json::from_str(schema)
                .unwrap_or_else(|e| panic!("schema for {name} is invalid: {e}"));
            assert_eq!(parsed["required"], json!(["url"]));
        }
    }

    #[test]
    fn test_args_accept_missing_tag() {
        let args: ProductLinkArgs =
            serde_json::from_value(json!({"url": "https://www.amazon.co.jp/dp/B000ABCD12"}))
                .unwrap();
        assert_eq!(args.tag, None);
    }

    #[test]
    fn test_args_reject_wrong_types() {
        assert!(serde_json::from_value::<ProductLinkArgs>(json!({"url": 42})).is_err());
        assert!(serde_json::from_value::<ProductLinkArgs>(json!({"url": "u", "tag": 1})).is_err());
        assert!(serde_json::from_value::<ProductLinkArgs>(json!({"tag": "t"})).is_err());
        assert!(serde_json::from_value::<ProductLinkArgs>(json!("just a string")).is_err());
    }
}
