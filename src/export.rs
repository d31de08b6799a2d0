use crate::call::Call;

pub const CSV_HEADER: &str = "id,src_number,dst_number,status";

/// Renders calls as CSV, one line per call after the header. Values are
/// written as they are; commas or quotes inside them are not escaped.
pub fn to_csv(calls: &[Call]) -> String {
    let mut lines = Vec::with_capacity(calls.len() + 1);
    lines.push(CSV_HEADER.to_owned());

    for call in calls {
        lines.push(format!(
            "{},{},{},{}",
            call.id, call.src_number, call.dst_number, call.status
        ));
    }

    lines.join("\n")
}
