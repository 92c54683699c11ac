use std::{collections::HashMap, fs::File, io::{BufReader, BufWriter}, path::Path};

use log::debug;

use crate::{bitstrings::Bit, codec::{CodecConfig, DecodeMode}, error::{HuffmanError, Result}};

pub const DECODE_MODE_KEY: &str = "decode.mode";
pub const SINGLE_SYMBOL_BIT_KEY: &str = "single_symbol.bit";

impl TryFrom<HashMap<String, String>> for CodecConfig {
    type Error = HuffmanError;

    /// Absent keys keep their defaults. Unknown keys are ignored.
    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        let mut config = CodecConfig::default();

        if let Some(mode) = value.get(DECODE_MODE_KEY) {
            config.decode_mode = match mode.trim() {
                "permissive" => DecodeMode::Permissive,
                "strict" => DecodeMode::Strict,
                other => return Err(HuffmanError::Config(
                    format!("{} must be 'permissive' or 'strict', got {:?}", DECODE_MODE_KEY, other)
                )),
            };
        }
        if let Some(bit) = value.get(SINGLE_SYMBOL_BIT_KEY) {
            let bit = bit.trim();
            let mut chars = bit.chars();
            config.single_symbol_bit = match (chars.next(), chars.next()) {
                (Some(c), None) => Bit::try_from(c).map_err(|_| bad_bit(bit))?,
                _ => return Err(bad_bit(bit)),
            };
        }

        Ok(config)
    }
}

fn bad_bit(value: &str) -> HuffmanError {
    HuffmanError::Config(format!("{} must be '0' or '1', got {:?}", SINGLE_SYMBOL_BIT_KEY, value))
}

impl CodecConfig {
    /// Reads a configuration from a Java-style `.properties` file.
    pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let props = java_properties::read(BufReader::new(file))
            .map_err(|e| HuffmanError::Config(format!("failed parsing {}: {}", path.display(), e)))?;

        let config = CodecConfig::try_from(props)?;
        debug!("loaded {:?} from {}", config, path.display());

        Ok(config)
    }

    pub fn to_properties(&self) -> HashMap<String, String> {
        let mode = match self.decode_mode {
            DecodeMode::Permissive => "permissive",
            DecodeMode::Strict => "strict",
        };

        HashMap::from([
            (DECODE_MODE_KEY.to_owned(), mode.to_owned()),
            (SINGLE_SYMBOL_BIT_KEY.to_owned(), self.single_symbol_bit.to_string()),
        ])
    }

    pub fn store_properties<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        java_properties::write(BufWriter::new(file), &self.to_properties())
            .map_err(|e| HuffmanError::Config(format!("failed writing {}: {}", path.as_ref().display(), e)))
    }
}
