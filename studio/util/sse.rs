use std::io::Write;

/// Formats a named SSE event with a JSON data payload:
///
/// ```text
/// event: <name>\n
/// data: <json>\n
/// \n
/// ```
pub fn event_frame(name: &str, json_data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", name, json_data)
}

/// Keep-alive comment frame. SSE comments start with `:` and are ignored by
/// EventSource clients but prevent the connection from timing out.
pub fn keepalive_frame() -> &'static str {
    ": ping\n\n"
}

/// Writes one frame and flushes. `Err` means the client disconnected.
pub fn send<W: Write>(writer: &mut W, frame: &str) -> std::io::Result<()> {
    writer.write_all(frame.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_follow_the_sse_wire_format() {
        assert_eq!(
            event_frame("tick", "{\"epoch\":3}"),
            "event: tick\ndata: {\"epoch\":3}\n\n"
        );
        assert!(keepalive_frame().starts_with(':'));
        assert!(keepalive_frame().ends_with("\n\n"));
    }
}
