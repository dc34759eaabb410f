//! Line-oriented terminal front end: every input line is one submission.

use std::error::Error;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::common::ChatMessage;
use crate::network::AnswerEndpoint;
use crate::session::ChatSession;
use crate::ui::components::header::TITLE;

pub async fn run<E: AnswerEndpoint>(endpoint: E) -> Result<(), Box<dyn Error>> {
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    run_with(&endpoint, input, tokio::io::stdout()).await
}

pub async fn run_with<E, R, W>(endpoint: &E, input: R, mut output: W) -> Result<(), Box<dyn Error>>
where
    E: AnswerEndpoint + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = ChatSession::new();
    let mut lines = input.lines();
    let mut shown = 0;

    output
        .write_all(format!("{TITLE} (Ctrl-D to quit)\n").as_bytes())
        .await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        session.set_draft(line);
        if !session.can_submit() {
            continue;
        }

        output.write_all(b"... bot is typing\n").await?;
        output.flush().await?;
        session.submit(endpoint).await;

        for message in session.log().since(shown) {
            output.write_all(format_line(message).as_bytes()).await?;
        }
        shown = session.messages().len();
        output.flush().await?;
    }

    log::info!("Console session ended after {} messages", session.log().len());
    Ok(())
}

fn format_line(message: &ChatMessage) -> String {
    format!(
        "[{}] {}: {}\n",
        message.time_of_day(),
        message.sender.label(),
        message.text
    )
}
