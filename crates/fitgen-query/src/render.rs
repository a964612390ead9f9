use crate::runner::QueryOutput;

const NULL_TEXT: &str = "N/A";
const EMPTY_TEXT: &str = "No results found.";

/// Render each row as `a | b | N/A`, separated by blank lines.
pub fn render_rows(output: &QueryOutput) -> String {
    if output.rows.is_empty() {
        return format!("{EMPTY_TEXT}\n");
    }
    let mut out = String::new();
    for row in &output.rows {
        let line = row
            .iter()
            .map(|cell| {
                if cell.is_null() {
                    NULL_TEXT.to_string()
                } else {
                    cell.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&line);
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::CellValue;

    #[test]
    fn nulls_render_as_not_available() {
        let output = QueryOutput {
            columns: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![vec![
                CellValue::Int(1),
                CellValue::Text("Running".into()),
                CellValue::Null,
            ]],
        };
        assert_eq!(render_rows(&output), "1 | Running | N/A\n\n");
    }

    #[test]
    fn empty_output_says_so() {
        assert_eq!(render_rows(&QueryOutput::default()), "No results found.\n");
    }
}
