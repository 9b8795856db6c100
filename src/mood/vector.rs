//! The five-dimension music mood vector.

use serde::{Deserialize, Serialize};

use crate::utilities::numeric::round4;

/// Value of every dimension when no signal is available.
pub const NEUTRAL: f64 = 0.5;

/// Named mood dimensions, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodDimension {
    Valence,
    Energy,
    Focus,
    Danceability,
    TempoPref,
}

impl MoodDimension {
    pub const ALL: [MoodDimension; 5] = [
        MoodDimension::Valence,
        MoodDimension::Energy,
        MoodDimension::Focus,
        MoodDimension::Danceability,
        MoodDimension::TempoPref,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodDimension::Valence => "valence",
            MoodDimension::Energy => "energy",
            MoodDimension::Focus => "focus",
            MoodDimension::Danceability => "danceability",
            MoodDimension::TempoPref => "tempo_pref",
        }
    }
}

/// Music mood: every dimension is always present and lies in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodVector {
    pub valence: f64,
    pub energy: f64,
    pub focus: f64,
    pub danceability: f64,
    pub tempo_pref: f64,
}

impl Default for MoodVector {
    fn default() -> Self {
        Self::neutral()
    }
}

impl MoodVector {
    pub const fn new(valence: f64, energy: f64, focus: f64, danceability: f64, tempo_pref: f64) -> Self {
        Self {
            valence,
            energy,
            focus,
            danceability,
            tempo_pref,
        }
    }

    /// All dimensions at 0.5.
    pub const fn neutral() -> Self {
        Self::splat(NEUTRAL)
    }

    /// All dimensions set to `value`.
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub fn get(&self, dim: MoodDimension) -> f64 {
        match dim {
            MoodDimension::Valence => self.valence,
            MoodDimension::Energy => self.energy,
            MoodDimension::Focus => self.focus,
            MoodDimension::Danceability => self.danceability,
            MoodDimension::TempoPref => self.tempo_pref,
        }
    }

    pub fn set(&mut self, dim: MoodDimension, value: f64) {
        match dim {
            MoodDimension::Valence => self.valence = value,
            MoodDimension::Energy => self.energy = value,
            MoodDimension::Focus => self.focus = value,
            MoodDimension::Danceability => self.danceability = value,
            MoodDimension::TempoPref => self.tempo_pref = value,
        }
    }

    /// Build a vector dimension by dimension.
    pub fn from_fn<F: FnMut(MoodDimension) -> f64>(mut f: F) -> Self {
        let mut out = Self::neutral();
        for dim in MoodDimension::ALL {
            out.set(dim, f(dim));
        }
        out
    }

    /// Copy with every dimension rounded to 4 decimals.
    pub fn rounded(&self) -> Self {
        Self::from_fn(|dim| round4(self.get(dim)))
    }

    /// Dimensions paired with their names, in output order.
    pub fn iter(&self) -> impl Iterator<Item = (MoodDimension, f64)> + '_ {
        MoodDimension::ALL.into_iter().map(move |dim| (dim, self.get(dim)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let mood = MoodVector::default();
        for (_, value) in mood.iter() {
            assert_eq!(value, 0.5);
        }
    }

    #[test]
    fn test_serializes_all_five_dimensions_in_order() {
        let json = serde_json::to_string(&MoodVector::new(0.1, 0.2, 0.3, 0.4, 0.5)).unwrap();
        assert_eq!(
            json,
            r#"{"valence":0.1,"energy":0.2,"focus":0.3,"danceability":0.4,"tempo_pref":0.5}"#
        );
    }

    #[test]
    fn test_get_set_roundtrip_by_dimension() {
        let mut mood = MoodVector::neutral();
        mood.set(MoodDimension::Danceability, 0.9);
        assert_eq!(mood.get(MoodDimension::Danceability), 0.9);
        assert_eq!(mood.danceability, 0.9);
        assert_eq!(MoodDimension::TempoPref.as_str(), "tempo_pref");
    }

    #[test]
    fn test_rounded() {
        let mood = MoodVector::splat(0.123456).rounded();
        assert_eq!(mood, MoodVector::splat(0.1235));
    }
}
