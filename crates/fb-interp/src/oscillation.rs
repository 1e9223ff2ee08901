use fb_core::{CheckPolicy, Extrapolation, Result, Scalar, View};
use fb_kernel::{ComplexCarrier, FilterGenerator, NEGATIVE_CARRIER, POSITIVE_CARRIER, Weighted};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config::InterpolatorConfig;
use crate::interpolator::UniversalInterpolator;

/// Where the spectrum of a complex signal is assumed to be centered.
///
/// The choice is a caller-side contract. A signal evaluated with the wrong
/// oscillation gives a plausible but aliased value; nothing detects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Oscillation {
    /// Centered at DC.
    #[default]
    NoOscillation,
    /// Shifted by +1/4 of the sampling rate.
    PositiveOscillation,
    /// Shifted by -1/4 of the sampling rate.
    NegativeOscillation,
}

impl Oscillation {
    pub const ALL: [Oscillation; 3] = [
        Oscillation::NoOscillation,
        Oscillation::PositiveOscillation,
        Oscillation::NegativeOscillation,
    ];

    pub fn carrier(self) -> f64 {
        match self {
            Oscillation::NoOscillation => 0.0,
            Oscillation::PositiveOscillation => POSITIVE_CARRIER,
            Oscillation::NegativeOscillation => NEGATIVE_CARRIER,
        }
    }

    fn slot(self) -> usize {
        match self {
            Oscillation::NoOscillation => 0,
            Oscillation::PositiveOscillation => 1,
            Oscillation::NegativeOscillation => 2,
        }
    }
}

/// Three complex banks built from one real generator, one per
/// [`Oscillation`].
#[derive(Debug, Clone, Default)]
pub struct OscillatingInterpolator {
    banks: [UniversalInterpolator<Complex64>; 3],
}

impl OscillatingInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config<G>(generator: &G, config: &InterpolatorConfig) -> Result<Self>
    where
        G: FilterGenerator<Tap = f64> + Clone,
    {
        let mut interp = Self::new();
        interp.set_extrapolation(config.extrapolation);
        interp.init_filters(config.divisions, generator)?;
        Ok(interp)
    }

    /// Builds all three banks; on error none of them changes.
    pub fn init_filters<G>(&mut self, n_divisions: usize, generator: &G) -> Result<()>
    where
        G: FilterGenerator<Tap = f64> + Clone,
    {
        let mut banks = self.banks.clone();
        for osc in Oscillation::ALL {
            let carrier = ComplexCarrier::new(generator.clone(), osc.carrier())?;
            banks[osc.slot()].init_filters(n_divisions, &carrier)?;
        }
        self.banks = banks;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.banks.iter().all(|b| b.is_initialized())
    }

    pub fn interpolator(&self, oscillation: Oscillation) -> &UniversalInterpolator<Complex64> {
        &self.banks[oscillation.slot()]
    }

    pub fn set_extrapolation(&mut self, mode: Extrapolation) {
        for bank in &mut self.banks {
            bank.set_extrapolation(mode);
        }
    }

    pub fn interpolate<S, C>(
        &self,
        signal: &View<'_, S, C>,
        x: f64,
        oscillation: Oscillation,
    ) -> Result<Complex64>
    where
        Complex64: Weighted<S, Output = Complex64>,
        S: Scalar,
        C: CheckPolicy,
    {
        self.interpolator(oscillation).interpolate(signal, x)
    }
}
