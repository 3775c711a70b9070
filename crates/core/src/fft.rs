//! Radix-2 Cooley-Tukey FFT
//!
//! [`FftPlan`] is the production transform: an iterative, in-place butterfly
//! network over a precomputed bit-reversal permutation and twiddle table.
//! [`fft_recursive`] is the textbook decimation-in-time recursion and serves
//! as a reference that the plan is checked against.

use crate::{complex::Complex, CoreError, Result};
use std::f64::consts::PI;
use tracing::debug;

/// Reject lengths the radix-2 transform cannot handle
fn check_len(len: usize) -> Result<()> {
    if len == 0 {
        return Err(CoreError::EmptyInput);
    }
    if !len.is_power_of_two() {
        return Err(CoreError::NotPowerOfTwo { len });
    }
    Ok(())
}

/// Precomputed tables for an N-point transform
#[derive(Debug, Clone)]
pub struct FftPlan {
    size: usize,
    bit_reverse: Vec<usize>,
    twiddles: Vec<Complex>,
}

impl FftPlan {
    /// Plan a transform of `size` points; `size` must be a non-zero power of two
    pub fn new(size: usize) -> Result<Self> {
        check_len(size)?;

        let bits = size.trailing_zeros();
        let bit_reverse = (0..size)
            .map(|i| {
                if bits == 0 {
                    0
                } else {
                    i.reverse_bits() >> (usize::BITS - bits)
                }
            })
            .collect();

        // exp(-2πik/N) for k in [0, N/2)
        let twiddles = (0..size / 2)
            .map(|k| Complex::cis(-2.0 * PI * k as f64 / size as f64))
            .collect();

        debug!("Planned {}-point FFT", size);

        Ok(Self {
            size,
            bit_reverse,
            twiddles,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward transform in place. The result is the unnormalized DFT.
    pub fn forward(&self, data: &mut [Complex]) -> Result<()> {
        self.check_buffer(data)?;
        self.permute(data);

        let n = self.size;
        let mut len = 2;
        while len <= n {
            let half = len / 2;
            let stride = n / len;
            for start in (0..n).step_by(len) {
                for k in 0..half {
                    let even = data[start + k];
                    let t = self.twiddles[k * stride] * data[start + k + half];
                    data[start + k] = even + t;
                    data[start + k + half] = even - t;
                }
            }
            len <<= 1;
        }

        Ok(())
    }

    /// Inverse transform in place, scaled by 1/N so that it undoes [`forward`](Self::forward)
    pub fn inverse(&self, data: &mut [Complex]) -> Result<()> {
        self.check_buffer(data)?;

        for c in data.iter_mut() {
            *c = c.conj();
        }
        self.forward(data)?;

        let scale = 1.0 / self.size as f64;
        for c in data.iter_mut() {
            *c = c.conj() * scale;
        }

        Ok(())
    }

    fn check_buffer(&self, data: &[Complex]) -> Result<()> {
        if data.len() != self.size {
            return Err(CoreError::BufferSizeMismatch {
                expected: self.size,
                actual: data.len(),
            });
        }
        Ok(())
    }

    fn permute(&self, data: &mut [Complex]) {
        for (i, &j) in self.bit_reverse.iter().enumerate() {
            if i < j {
                data.swap(i, j);
            }
        }
    }
}

/// Forward FFT of `input` into a new vector
pub fn fft(input: &[Complex]) -> Result<Vec<Complex>> {
    let plan = FftPlan::new(input.len())?;
    let mut output = input.to_vec();
    plan.forward(&mut output)?;
    Ok(output)
}

/// Recursive decimation-in-time FFT.
///
/// Splits the input into even and odd indices, transforms each half and
/// recombines them with the twiddle factors. Kept alongside [`FftPlan`] as a
/// straightforward reference; prefer the plan for repeated work.
pub fn fft_recursive(input: &[Complex]) -> Result<Vec<Complex>> {
    check_len(input.len())?;
    Ok(recurse(input))
}

fn recurse(x: &[Complex]) -> Vec<Complex> {
    let n = x.len();
    if n <= 1 {
        return x.to_vec();
    }

    let even: Vec<Complex> = x.iter().step_by(2).copied().collect();
    let odd: Vec<Complex> = x.iter().skip(1).step_by(2).copied().collect();
    let y_even = recurse(&even);
    let y_odd = recurse(&odd);

    let half = n / 2;
    let mut out = vec![Complex::ZERO; n];
    for k in 0..half {
        let t = Complex::cis(-2.0 * PI * k as f64 / n as f64) * y_odd[k];
        out[k] = y_even[k] + t;
        out[k + half] = y_even[k] - t;
    }
    out
}

/// Windowing functions applied before spectral analysis
pub mod window {
    use serde::{Deserialize, Serialize};
    use std::f64::consts::PI;
    use std::fmt;
    use std::str::FromStr;

    /// Analysis window. `Rectangular` leaves the signal untouched.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Window {
        #[default]
        Rectangular,
        Hann,
        Hamming,
        Blackman,
    }

    impl Window {
        pub const ALL: [Window; 4] = [
            Window::Rectangular,
            Window::Hann,
            Window::Hamming,
            Window::Blackman,
        ];

        pub fn name(&self) -> &'static str {
            match self {
                Window::Rectangular => "rectangular",
                Window::Hann => "hann",
                Window::Hamming => "hamming",
                Window::Blackman => "blackman",
            }
        }

        /// Coefficient `i` of an `n`-point symmetric window
        pub fn coefficient(&self, i: usize, n: usize) -> f64 {
            if n <= 1 {
                return 1.0;
            }
            let phase = 2.0 * PI * i as f64 / (n - 1) as f64;
            match self {
                Window::Rectangular => 1.0,
                Window::Hann => 0.5 * (1.0 - phase.cos()),
                Window::Hamming => 0.54 - 0.46 * phase.cos(),
                Window::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
            }
        }

        /// Mean coefficient over `n` points; the amplitude a full-scale tone keeps after windowing
        pub fn coherent_gain(&self, n: usize) -> f64 {
            if n == 0 {
                return 1.0;
            }
            (0..n).map(|i| self.coefficient(i, n)).sum::<f64>() / n as f64
        }

        /// Multiply `signal` by the window in place
        pub fn apply(&self, signal: &mut [f64]) {
            if *self == Window::Rectangular {
                return;
            }
            let n = signal.len();
            for (i, sample) in signal.iter_mut().enumerate() {
                *sample *= self.coefficient(i, n);
            }
        }
    }

    impl fmt::Display for Window {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name())
        }
    }

    impl FromStr for Window {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_lowercase().as_str() {
                "rectangular" | "rect" | "none" => Ok(Window::Rectangular),
                "hann" | "hanning" => Ok(Window::Hann),
                "hamming" => Ok(Window::Hamming),
                "blackman" => Ok(Window::Blackman),
                other => Err(format!("Unknown window: {}", other)),
            }
        }
    }
}
