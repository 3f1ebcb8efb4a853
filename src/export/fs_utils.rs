use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::Path;

/// Ask before overwriting an existing file unless `force` is set.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    if !ask_confirmation("Overwrite?")? {
        return Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ));
    }

    info("Existing file will be overwritten.");
    Ok(())
}

/// `[y/N]` prompt on stdin; anything but y/yes is a no.
pub fn ask_confirmation(prompt: &str) -> AppResult<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    Ok(ans == "y" || ans == "yes")
}
