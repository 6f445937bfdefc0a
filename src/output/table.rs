//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table, or a placeholder when there are none
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No tasks found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "TITLE")]
        title: String,
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<Row> = vec![];
        assert_eq!(format_table(&rows), "No tasks found.");
    }

    #[test]
    fn test_format_table_rows() {
        let rows = vec![
            Row {
                id: 1,
                title: "First".to_string(),
            },
            Row {
                id: 2,
                title: "Second".to_string(),
            },
        ];

        let result = format_table(&rows);
        assert!(result.contains("TITLE"));
        assert!(result.contains("First"));
        assert!(result.contains("Second"));
        // Rounded style corners
        assert!(result.contains('╭'));
        assert!(result.contains('╰'));
    }
}
