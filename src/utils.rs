use serde_json::Value;

use crate::insight::Insight;

pub fn print_with_indentation(indent: usize, s: &str) {
    println!("{}", indent_line(indent, s));
}

fn indent_line(indent: usize, s: &str) -> String {
    format!("{}{}", "    ".repeat(indent), s)
}

/// Prints a normalized parameter tree, one value per line
pub fn print_parse_tree(parse_tree: &Value, indentation: usize) {
    for line in parse_tree_lines(parse_tree, indentation) {
        println!("{}", line);
    }
}

pub fn parse_tree_lines(parse_tree: &Value, indentation: usize) -> Vec<String> {
    let mut lines = Vec::new();
    collect_parse_tree(parse_tree, indentation, &mut lines);
    lines
}

fn collect_parse_tree(parse_tree: &Value, indentation: usize, lines: &mut Vec<String>) {
    match parse_tree {
        Value::Array(ref elements) => {
            lines.push(indent_line(indentation, "Array: "));
            for item in elements {
                collect_parse_tree(item, indentation + 1, lines);
            }
        }
        Value::String(ref s) => lines.push(indent_line(indentation, &format!("Value: {}", s))),
        value => lines.push(indent_line(indentation, &format!("Value: {}", value))),
    }
}

/// Human readable rendering of an insight for terminals
pub fn print_insight(insight: &Insight) {
    print_with_indentation(0, &format!("Function: {}", insight.kind));
    if let Some(params) = &insight.params {
        print_with_indentation(0, "Params:");
        // Top level array is the argument list itself
        match params {
            Value::Array(arguments) => {
                for argument in arguments {
                    print_parse_tree(argument, 1);
                }
            }
            other => print_parse_tree(other, 1),
        }
    }
    if let Some(error) = &insight.decode_error {
        print_with_indentation(0, &format!("Decode error: {}", error));
    }
    if insight.candidates.len() > 1 {
        print_with_indentation(0, "Other candidates:");
        for candidate in insight.candidates.iter().skip(1) {
            print_with_indentation(1, candidate);
        }
    }
}
