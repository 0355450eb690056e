//! Tool classification and warning construction

use crate::types::{Tool, ToolChoice, ToolDefinition, Warning};
use tracing::debug;

pub fn is_function_tool(tool: &Tool) -> bool {
    match tool {
        Tool::Function { .. } => true,
        Tool::Provider { .. } => false,
    }
}

pub fn create_unsupported_setting_warning(
    feature: impl Into<String>,
    details: impl Into<String>,
) -> Warning {
    Warning::Unsupported {
        feature: feature.into(),
        details: details.into(),
    }
}

pub fn create_unsupported_tool_warning(tool: &Tool, details: impl Into<String>) -> Warning {
    Warning::Unsupported {
        feature: format!("tool:{}", tool.name()),
        details: details.into(),
    }
}

/// Tools that can be offered through the prompt, plus everything that could not
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedTools {
    pub tools: Vec<ToolDefinition>,
    pub warnings: Vec<Warning>,
}

/// Split a tool list into prompt-describable definitions and warnings
pub fn prepare_tools(tools: &[Tool], tool_choice: Option<&ToolChoice>) -> PreparedTools {
    let mut prepared = PreparedTools::default();

    match tool_choice {
        Some(ToolChoice::None) => {
            debug!("Tool choice is 'none', offering no tools");
            return prepared;
        }
        Some(ToolChoice::Required) => {
            prepared.warnings.push(create_unsupported_setting_warning(
                "toolChoice",
                "Text-based tool calling cannot force a tool call; treating 'required' as 'auto'",
            ));
        }
        Some(ToolChoice::Tool { tool_name }) => {
            prepared.warnings.push(create_unsupported_setting_warning(
                "toolChoice",
                format!(
                    "Text-based tool calling cannot force a call to '{tool_name}'; treating it as 'auto'"
                ),
            ));
        }
        Some(ToolChoice::Auto) | None => {}
    }

    for tool in tools {
        match tool {
            Tool::Function {
                name,
                description,
                input_schema,
            } => prepared.tools.push(ToolDefinition {
                name: name.clone(),
                description: description.clone().unwrap_or_default(),
                parameters: input_schema.clone(),
            }),
            Tool::Provider { id, .. } => {
                prepared.warnings.push(create_unsupported_tool_warning(
                    tool,
                    format!("Provider tool '{id}' cannot be executed through text-based tool calling"),
                ));
            }
        }
    }

    prepared
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn function_tool(name: &str) -> Tool {
        Tool::Function {
            name: name.to_string(),
            description: Some(format!("The {name} tool")),
            input_schema: json!({"type": "object"}),
        }
    }

    fn provider_tool(name: &str) -> Tool {
        Tool::Provider {
            name: name.to_string(),
            id: format!("host.{name}"),
            args: json!({}),
        }
    }

    #[test]
    fn test_is_function_tool() {
        assert!(is_function_tool(&function_tool("read")));
        assert!(!is_function_tool(&provider_tool("browse")));
    }

    #[test]
    fn test_tool_warning_feature_uses_name_for_both_variants() {
        let warning = create_unsupported_tool_warning(&provider_tool("browse"), "no");
        assert_eq!(warning.feature(), "tool:browse");

        let warning = create_unsupported_tool_warning(&function_tool("read"), "no");
        assert_eq!(
            warning,
            Warning::Unsupported {
                feature: "tool:read".to_string(),
                details: "no".to_string(),
            }
        );
    }

    #[test]
    fn test_setting_warning() {
        let warning = create_unsupported_setting_warning("topK", "ignored");
        assert_eq!(warning.feature(), "topK");
    }

    #[test]
    fn test_prepare_tools_keeps_order_and_warns_for_provider_tools() {
        let tools = vec![
            function_tool("b"),
            provider_tool("browse"),
            function_tool("a"),
        ];

        let prepared = prepare_tools(&tools, None);
        let names: Vec<&str> = prepared.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(prepared.tools[0].description, "The b tool");
        assert_eq!(prepared.warnings.len(), 1);
        assert_eq!(prepared.warnings[0].feature(), "tool:browse");
    }

    #[test]
    fn test_prepare_tools_without_description() {
        let tools = vec![Tool::Function {
            name: "bare".to_string(),
            description: None,
            input_schema: json!({}),
        }];
        let prepared = prepare_tools(&tools, Some(&ToolChoice::Auto));
        assert_eq!(prepared.tools[0].description, "");
        assert!(prepared.warnings.is_empty());
    }

    #[test]
    fn test_prepare_tools_choice_none_offers_nothing() {
        let tools = vec![function_tool("a"), provider_tool("browse")];
        let prepared = prepare_tools(&tools, Some(&ToolChoice::None));
        assert_eq!(prepared, PreparedTools::default());
    }

    #[test]
    fn test_prepare_tools_forced_choices_warn() {
        let tools = vec![function_tool("a")];

        let prepared = prepare_tools(&tools, Some(&ToolChoice::Required));
        assert_eq!(prepared.tools.len(), 1);
        assert_eq!(prepared.warnings[0].feature(), "toolChoice");

        let prepared = prepare_tools(
            &tools,
            Some(&ToolChoice::Tool {
                tool_name: "a".to_string(),
            }),
        );
        assert_eq!(prepared.tools.len(), 1);
        match &prepared.warnings[0] {
            Warning::Unsupported { feature, details } => {
                assert_eq!(feature, "toolChoice");
                assert!(details.contains("'a'"));
            }
        }
    }
}
