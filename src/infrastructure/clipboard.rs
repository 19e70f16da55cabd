pub struct SystemClipboard;

impl SystemClipboard {
    pub fn copy_text(text: &str) -> Result<String, String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| e.to_string())?;
        Ok(text.to_string())
    }
}
