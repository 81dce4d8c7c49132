use anyhow::Result;
use colored::Colorize;
use comfy_table::{
    modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS},
    presets::UTF8_FULL,
    Cell, Color, Table,
};
use gqlr_client::{Errors, GraphQLError, GraphQLResponse};
use serde::Serialize;
use serde_json::Value;

use crate::config::OutputFormat;

pub fn print_response(response: &GraphQLResponse<Value>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Table => match response {
            GraphQLResponse::Ok(data) => {
                println!("{}", "Query succeeded".green());
                print_json(data)
            }
            GraphQLResponse::Err(errors) => {
                println!("{}", "Query failed".red());
                print_errors_table(errors)
            }
        },
    }
}

fn print_errors_table(errors: &Errors<GraphQLError>) -> Result<()> {
    println!("{}", errors_table(errors));
    Ok(())
}

fn errors_table(errors: &Errors<GraphQLError>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_header(vec![
            Cell::new("MESSAGE").fg(Color::Blue),
            Cell::new("LOCATIONS").fg(Color::Blue),
            Cell::new("PATH").fg(Color::Blue),
        ]);

    for error in errors {
        table.add_row(vec![
            Cell::new(&error.message).fg(Color::Red),
            Cell::new(error.locations_display()),
            Cell::new(error.path_display()),
        ]);
    }
    table
}

fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlr_client::PathSegment;

    #[test]
    fn test_errors_table_rows() {
        let errors = Errors::new(vec![
            GraphQLError::new("first")
                .with_location(1, 3)
                .with_path(vec![PathSegment::from("me"), PathSegment::from(0i64)]),
            GraphQLError::new("second"),
        ])
        .unwrap();

        let table = errors_table(&errors);
        let rendered = table.to_string();

        assert_eq!(table.row_count(), 2);
        assert!(rendered.contains("first"));
        assert!(rendered.contains("1:3"));
        assert!(rendered.contains("me.0"));
        assert!(rendered.contains("second"));
    }
}
