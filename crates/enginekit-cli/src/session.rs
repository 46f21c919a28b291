//! Interactive SQL session rendered as a conversation.

use std::io::{self, BufRead, Write};

use enginekit_chat::{render_messages, Message, MessagePart, SqlRunResult, SqlRunner};
use serde_json::json;

pub const PROMPT: &str = "sql >> ";

/// Banner printed before the first prompt.
pub fn intro(db_path: &std::path::Path) -> String {
    format!(
        "Starting session using SQLite DB {}. Every line is run as one SQL statement \
         against the database.\n\nTry:\n- CREATE TABLE weather (city TEXT, temp REAL)\n\
         - INSERT INTO weather VALUES ('Berlin', 12.5), ('Lisbon', 21.0)\n\
         - SELECT * FROM weather\n\n---",
        db_path.display()
    )
}

/// The messages for one user statement and its tool round trip.
pub fn exchange(sql_query: &str, result: &SqlRunResult) -> Vec<Message> {
    let call_id = "run_sql-0".to_string();
    vec![
        Message::request(vec![MessagePart::user(sql_query)]),
        Message::response(vec![MessagePart::ToolCall {
            tool_name: "run_sql".into(),
            args: json!({ "sql_query": sql_query }),
            tool_call_id: Some(call_id.clone()),
        }]),
        Message::request(vec![MessagePart::ToolReturn {
            tool_name: "run_sql".into(),
            content: serde_json::to_value(result).unwrap_or_default(),
            tool_call_id: Some(call_id),
        }]),
        Message::response(vec![MessagePart::text(result.summary())]),
    ]
}

/// Read statements from `input` until EOF, printing each exchange to `output`.
///
/// Blank lines are skipped. Returns the number of statements run.
pub fn run<R: BufRead, W: Write>(runner: &SqlRunner, input: R, mut output: W) -> io::Result<usize> {
    writeln!(output, "{}", intro(runner.db_path()))?;

    let mut count = 0;
    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output, "\nExiting...")?;
            break;
        };
        let line = line?;
        let sql_query = line.trim();
        if sql_query.is_empty() {
            continue;
        }

        let result = runner.run_sql(sql_query);
        writeln!(output, "{}", render_messages(&exchange(sql_query, &result)))?;
        count += 1;
    }

    Ok(count)
}
