use hostcli::project::Projection;

use crate::{cli::OutputFormat, tables::RecordTableReporter};

pub(crate) fn handle_list(
    message: Option<&str>,
    projection: &Projection,
    format: OutputFormat,
    use_colors: bool,
) -> i32 {
    match format {
        OutputFormat::Table => {
            if let Some(message) = message {
                println!("{message}");
            }

            let mut table = RecordTableReporter::new(projection.header(), use_colors);
            for row in projection.rows() {
                table.add_values(&row.values);
            }
            table.print();
        }
        OutputFormat::Json => println!("{:#}", projection.to_json()),
    }

    0
}
