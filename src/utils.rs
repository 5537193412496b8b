use std::collections::VecDeque;

use crate::model::Price;

/// Mean over the last `period` values fed.
pub struct MovingAverage {
    window: VecDeque<Price>,
    sum: Price,
    period: usize,
}

impl MovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(period),
            sum: Price::default(),
            period,
        }
    }

    /// Pushes `value` and returns the mean once the window is full.
    pub fn feed(&mut self, value: Price) -> Option<Price> {
        if self.period == 0 {
            return None;
        }

        self.window.push_back(value);
        self.sum += value;

        if self.window.len() > self.period {
            if let Some(front) = self.window.pop_front() {
                self.sum -= front;
            }
        }

        (self.window.len() == self.period).then(|| self.avg())
    }

    pub fn clear(&mut self) {
        self.window.clear();
        self.sum = Price::default();
    }

    pub fn avg(&self) -> Price {
        self.sum / self.window.len() as Price
    }
}

/// Wilder's smoothing: seeded with a plain mean of the first `period`
/// values, then `avg = (avg * (period - 1) + value) / period`.
pub struct WilderAverage {
    period: usize,
    seed: MovingAverage,
    value: Option<Price>,
}

impl WilderAverage {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seed: MovingAverage::new(period),
            value: None,
        }
    }

    pub fn feed(&mut self, value: Price) -> Option<Price> {
        let period = self.period as Price;
        self.value = match self.value {
            Some(avg) => Some((avg * (period - 1.0) + value) / period),
            None => self.seed.feed(value),
        };
        self.value
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
