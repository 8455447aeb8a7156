use std::{fmt, str::FromStr};

use thiserror::Error;

/// One of the fixed set of beer style categories.
///
/// The variant order is canonical: every per-style vector in the pipeline is
/// keyed by it, so user counts and population availability can never be
/// compared across different styles by accident.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum Style {
    Bock,
    BrownAle,
    DarkAles,
    DarkLager,
    HybridBeer,
    IndiaPaleAle,
    PaleAle,
    PaleLager,
    Porter,
    SpecialityBeer,
    Stout,
    StrongAle,
    WheatBeer,
    WildSourBeer,
}

impl Style {
    pub const COUNT: usize = 14;

    pub const ALL: [Style; Style::COUNT] = [
        Style::Bock,
        Style::BrownAle,
        Style::DarkAles,
        Style::DarkLager,
        Style::HybridBeer,
        Style::IndiaPaleAle,
        Style::PaleAle,
        Style::PaleLager,
        Style::Porter,
        Style::SpecialityBeer,
        Style::Stout,
        Style::StrongAle,
        Style::WheatBeer,
        Style::WildSourBeer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Bock => "Bock",
            Style::BrownAle => "Brown Ale",
            Style::DarkAles => "Dark Ales",
            Style::DarkLager => "Dark Lager",
            Style::HybridBeer => "Hybrid Beer",
            Style::IndiaPaleAle => "India Pale Ale",
            Style::PaleAle => "Pale Ale",
            Style::PaleLager => "Pale Lager",
            Style::Porter => "Porter",
            Style::SpecialityBeer => "Speciality Beer",
            Style::Stout => "Stout",
            Style::StrongAle => "Strong Ale",
            Style::WheatBeer => "Wheat Beer",
            Style::WildSourBeer => "Wild/Sour Beer",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Error)]
#[error("invalid beer style")]
pub struct InvalidStyle;

impl FromStr for Style {
    type Err = InvalidStyle;

    fn from_str(s: &str) -> Result<Style, InvalidStyle> {
        Ok(match s {
            "Bock" => Style::Bock,
            "Brown Ale" => Style::BrownAle,
            "Dark Ales" => Style::DarkAles,
            "Dark Lager" => Style::DarkLager,
            "Hybrid Beer" => Style::HybridBeer,
            "India Pale Ale" => Style::IndiaPaleAle,
            "Pale Ale" => Style::PaleAle,
            "Pale Lager" => Style::PaleLager,
            "Porter" => Style::Porter,
            "Speciality Beer" => Style::SpecialityBeer,
            "Stout" => Style::Stout,
            "Strong Ale" => Style::StrongAle,
            "Wheat Beer" => Style::WheatBeer,
            "Wild/Sour Beer" => Style::WildSourBeer,
            _ => return Err(InvalidStyle),
        })
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value per beer style, keyed by [`Style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByStyle<T> {
    inner: [T; Style::COUNT],
}

impl<T: Default> Default for ByStyle<T> {
    fn default() -> ByStyle<T> {
        ByStyle::from_fn(|_| T::default())
    }
}

impl<T> ByStyle<T> {
    pub fn from_fn<F>(mut f: F) -> ByStyle<T>
    where
        F: FnMut(Style) -> T,
    {
        ByStyle {
            inner: std::array::from_fn(|i| f(Style::ALL[i])),
        }
    }

    pub fn get(&self, style: Style) -> &T {
        &self.inner[style.index()]
    }

    pub fn get_mut(&mut self, style: Style) -> &mut T {
        &mut self.inner[style.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Style, &T)> {
        Style::ALL.iter().copied().zip(self.inner.iter())
    }

    pub fn map<U, F>(&self, mut f: F) -> ByStyle<U>
    where
        F: FnMut(Style, &T) -> U,
    {
        ByStyle::from_fn(|style| f(style, self.get(style)))
    }

    pub fn values(&self) -> &[T; Style::COUNT] {
        &self.inner
    }

    pub fn values_mut(&mut self) -> &mut [T; Style::COUNT] {
        &mut self.inner
    }
}
