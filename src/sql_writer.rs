use crate::separated_by;

/// Renders statement text into a caller-provided buffer.
///
/// Rendering is pure: nothing here executes or binds. Values never appear in
/// the produced text (they travel as named parameters), but table and key
/// names are interpolated verbatim. Those names come from compile-time
/// entity declarations; letting them originate from user input is a
/// contract violation, not something this writer defends against.
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
    }

    /// Double-quotes an identifier, protecting reserved words and mixed
    /// case. Embedded quotes are doubled.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', r#""""#);
        out.push('"');
    }

    /// `"a", "b", "c"`
    fn write_column_list(&self, out: &mut String, columns: &[&str]) {
        separated_by(
            out,
            columns,
            |out, column| self.write_identifier_quoted(out, column),
            ", ",
        );
    }

    /// `:a, :b, :c`
    fn write_placeholder_list(&self, out: &mut String, columns: &[&str]) {
        separated_by(
            out,
            columns,
            |out, column| {
                out.push(':');
                out.push_str(column);
            },
            ", ",
        );
    }

    /// `a = :a, b = :b`, the SET clause body.
    fn write_assignment_list(&self, out: &mut String, columns: &[&str]) {
        separated_by(
            out,
            columns,
            |out, column| {
                out.push_str(column);
                out.push_str(" = :");
                out.push_str(column);
            },
            ", ",
        );
    }

    fn write_insert(&self, out: &mut String, table: &str, columns: &[&str], key: &str) {
        out.push_str("INSERT INTO ");
        out.push_str(table);
        out.push_str(" (");
        self.write_column_list(out, columns);
        out.push_str(") VALUES (");
        self.write_placeholder_list(out, columns);
        out.push_str(") RETURNING ");
        out.push_str(key);
    }

    fn write_update(&self, out: &mut String, table: &str, columns: &[&str], key: &str) {
        out.push_str("UPDATE ");
        out.push_str(table);
        out.push_str(" set ");
        self.write_assignment_list(out, columns);
        out.push_str(" where ");
        out.push_str(key);
        out.push_str(" = :");
        out.push_str(key);
    }
}

/// Stock writer for the statement shapes this layer produces.
pub struct GenericSqlWriter;

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
