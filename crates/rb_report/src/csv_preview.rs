//! Risk register CSV preview. Independent of the three artifacts.

use crate::structure::{parse_csv, CSV_COLUMNS};
use crate::surface::{Cell, Container, Node};

/// Clear the preview and fill it from `text`. Empty or header-only input
/// leaves the table empty.
pub fn render_csv_preview(text: &str, container: Option<&mut Container>) {
    let Some(c) = container else {
        return;
    };
    c.clear();
    for rec in parse_csv(text) {
        c.push(Node::Row { cells: CSV_COLUMNS.iter().map(|col| Cell::text(rec.get(col))).collect() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ContainerId;

    #[test]
    fn preview_uses_fixed_columns() {
        let text = "risk_id,asset_id,threat,notes\nR1,A1,Phishing,check MFA\nR2,A2\n";
        let mut c = Container::new(ContainerId::CsvPreviewTable);
        render_csv_preview(text, Some(&mut c));
        assert_eq!(
            c.row_texts(),
            vec![
                vec!["R1", "A1", "Phishing", "", "", "check MFA"],
                vec!["R2", "A2", "", "", "", ""],
            ]
        );
    }

    #[test]
    fn each_load_replaces_previous_rows() {
        let mut c = Container::new(ContainerId::CsvPreviewTable);
        render_csv_preview("risk_id\nR1\nR2\n", Some(&mut c));
        render_csv_preview("risk_id\nR9\n", Some(&mut c));
        assert_eq!(c.row_texts(), vec![vec!["R9", "", "", "", "", ""]]);
        render_csv_preview("", Some(&mut c));
        assert!(c.is_empty());
    }
}
