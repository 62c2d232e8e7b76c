use std::io::{self, BufRead, Write};

use crate::error::{Result, ScrapeError};

/// 在控制台打印提示并阻塞等待操作员按下回车，没有超时
pub async fn wait_for_enter(message: &str) -> Result<()> {
    let message = message.to_string();
    tokio::task::spawn_blocking(move || -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", message)?;
        stdout.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(())
    })
    .await
    .map_err(|e| ScrapeError::Prompt(e.to_string()))?
    .map_err(|e| ScrapeError::Prompt(e.to_string()))
}
