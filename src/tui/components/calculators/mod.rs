//! The eleven calculator cards, one per [`ModuleKey`].

mod logic;
mod measure;
mod numeric;

pub use logic::{KmapCard, TruthTableCard};
pub use measure::{SizeCard, ThroughputCard, TimeFreq};
pub use numeric::{AsciiCard, BaseConverter, Inverter, PadCard, Pow2Card, XorCard};

use crate::core::config::ResolvedConfig;
use crate::core::modules::ModuleKey;
use crate::tui::components::card::{Calculator, CardState};

/// A fresh calculator for `key`, seeded from the resolved configuration.
pub fn calculator_for(key: ModuleKey, config: &ResolvedConfig) -> Box<dyn Calculator> {
    match key {
        ModuleKey::Inverter => Box::new(Inverter::new()),
        ModuleKey::Pow2 => Box::new(Pow2Card::new()),
        ModuleKey::Base => Box::new(BaseConverter::new(config.base_pad_bits)),
        ModuleKey::TimeFreq => Box::new(TimeFreq::new()),
        ModuleKey::Pad => Box::new(PadCard::new()),
        ModuleKey::Size => Box::new(SizeCard::new()),
        ModuleKey::Throughput => Box::new(ThroughputCard::new()),
        ModuleKey::Ascii => Box::new(AsciiCard::new()),
        ModuleKey::TruthTable => Box::new(TruthTableCard::new(config.strict_boolean)),
        ModuleKey::Kmap => Box::new(KmapCard::new(config.kmap_variables)),
        ModuleKey::Xor => Box::new(XorCard::new(config.xor_pad_bits)),
    }
}

/// One card per module, in [`ModuleKey::ALL`] order. Hidden cards keep
/// their inputs so showing them again restores what was typed.
pub fn build_cards(config: &ResolvedConfig) -> Vec<CardState> {
    ModuleKey::ALL
        .iter()
        .map(|key| CardState::new(calculator_for(*key, config)))
        .collect()
}
