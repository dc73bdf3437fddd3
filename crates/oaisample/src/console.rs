//! Console I/O used by the conversation loop and the commands.

use std::io::{self, Write};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-oriented text console.
#[async_trait]
pub trait Console: Send {
    /// Write `text` followed by a newline.
    fn print(&mut self, text: &str);

    /// Read one line without its terminator. `None` at end of input.
    async fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Console over the process's stdout and stdin.
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        // A closed stdout is not recoverable from here.
        let _ = writeln!(stdout, "{text}");
        let _ = stdout.flush();
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        // `Lines` strips "\n" and "\r\n" but keeps other whitespace.
        self.lines.next_line().await
    }
}
