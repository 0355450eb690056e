use crate::tools::{
    build_json_tool_system_prompt, format_tool_results, parse_json_function_calls, prepare_tools,
};
use crate::types::{Tool, ToolResult};
use serde_json::{json, Value};

/// Encode a call the way the prompt instructs the model to
fn encode_call(name: &str, arguments: &Value) -> String {
    format!(
        "```tool_call\n{}\n```",
        json!({"name": name, "arguments": arguments})
    )
}

#[test]
fn test_encoded_calls_are_recovered_exactly() {
    let cases = vec![
        ("empty", json!({})),
        ("nested", json!({"filter": {"tags": ["a", "b"], "limit": 10}})),
        ("unicode", json!({"text": "Grüße 👋", "quote": "she said \"hi\""})),
        ("backticks", json!({"code": "```\nnot a fence\n```"})),
        ("numbers", json!({"pi": 3.25, "neg": -1, "big": 1_000_000_000_000u64})),
    ];

    for (name, arguments) in cases {
        let parsed = parse_json_function_calls(&encode_call(name, &arguments));
        assert_eq!(parsed.tool_calls.len(), 1, "case {name}");
        assert_eq!(parsed.tool_calls[0].tool_name, name);
        assert_eq!(parsed.tool_calls[0].args, arguments, "case {name}");
        assert_eq!(parsed.text_content, "");
    }
}

#[test]
fn test_prompt_example_parses_as_call() {
    // The example shown to the model must itself be a valid call
    let tools = prepare_tools(
        &[Tool::Function {
            name: "lookup".to_string(),
            description: Some("Look things up".to_string()),
            input_schema: json!({"type": "object", "properties": {"q": {"type": "string"}}}),
        }],
        None,
    );
    let prompt = build_json_tool_system_prompt(Some("Be brief."), &tools.tools);

    let parsed = parse_json_function_calls(&prompt);
    assert_eq!(parsed.tool_calls.len(), 1);
    assert_eq!(parsed.tool_calls[0].tool_name, "tool_name");
    assert!(parsed.text_content.contains("### lookup"));
}

#[test]
fn test_results_are_not_mistaken_for_calls() {
    let formatted = format_tool_results(&[ToolResult {
        tool_call_id: "tool-1-1".to_string(),
        tool_name: "lookup".to_string(),
        result: json!({"answer": 42}),
    }]);

    let parsed = parse_json_function_calls(&formatted);
    assert!(parsed.tool_calls.is_empty());
    assert_eq!(parsed.text_content, formatted);
}

#[test]
fn test_result_names_appear_verbatim() {
    let results: Vec<ToolResult> = ["alpha", "beta_2", "gamma-3"]
        .iter()
        .enumerate()
        .map(|(i, name)| ToolResult {
            tool_call_id: format!("tool-1-{}", i + 1),
            tool_name: name.to_string(),
            result: json!(i),
        })
        .collect();

    let formatted = format_tool_results(&results);
    for result in &results {
        assert!(formatted.contains(&result.tool_name));
    }
}
