use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use serde::Serialize;

pub struct JsonGenerator;

impl JsonGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate<T: Serialize, P: AsRef<Path>>(&self, output: &T, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(output)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn generate_string<T: Serialize>(&self, output: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(output)?)
    }
}

impl Default for JsonGenerator {
    fn default() -> Self {
        Self::new()
    }
}
