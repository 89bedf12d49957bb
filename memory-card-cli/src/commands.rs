use clap::Parser;
use memory_card::Value;
use std::convert::Infallible;

#[derive(Parser, Debug)]
pub enum Command {
    /// Print the value stored in a slot.
    Get(SlotArgs),
    /// Store a value in a slot and save the card.
    Set(SetArgs),
    /// Tell whether a slot exists.
    Has(SlotArgs),
    /// Remove a slot and save the card.
    Delete(SlotArgs),
    /// List slot names.
    Keys,
    /// List values.
    Values,
    /// List slot/value pairs.
    Entries,
    /// Print the number of slots.
    Size,
    /// Remove every slot and save the card.
    Clear,
    /// Print the whole card as a JSON object.
    Dump,
    /// Clear the card and delete its file.
    Destroy,
    /// Print the path of the backing file.
    Path,
    /// Print the memory-card library version.
    Version,
}

impl Command {
    pub(crate) fn is_mutation(&self) -> bool {
        matches!(self, Self::Set(_) | Self::Delete(_) | Self::Clear)
    }
}

#[derive(Parser, Debug)]
pub struct SlotArgs {
    /// Slot name
    pub(crate) slot: String,
}

#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Slot name
    pub(crate) slot: String,
    /// JSON value (stored as a string if it does not parse)
    #[arg(value_parser = parse_value, allow_hyphen_values = true)]
    pub(crate) value: Value,
}

fn parse_value(s: &str) -> Result<Value, Infallible> {
    Ok(serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string())))
}
