use hostcli::project::{ProjectedRow, RecordProjection};

use crate::{cli::OutputFormat, tables::RecordTableReporter};

fn print_block(header: &[String], row: &ProjectedRow, use_colors: bool) {
    let mut table = RecordTableReporter::field_value(use_colors);
    for (field, value) in header.iter().zip(&row.values) {
        table.add_field(field, value);
    }
    table.print();
}

/// Print every intermediate record as its own block followed by a blank line, then the
/// final record
///
pub(crate) fn handle_show(
    message: Option<&str>,
    record: &RecordProjection,
    format: OutputFormat,
    use_colors: bool,
) -> i32 {
    match format {
        OutputFormat::Table => {
            if let Some(message) = message {
                println!("{message}");
            }

            for row in record.intermediate() {
                print_block(record.header(), row, use_colors);
                println!();
            }
            print_block(record.header(), record.last(), use_colors);
        }
        OutputFormat::Json => {
            for block in record.intermediate_json() {
                println!("{block:#}");
                println!();
            }
            println!("{:#}", record.to_json());
        }
    }

    0
}
