use std::ops::Deref;
use std::sync::Arc;

/// Rise and decay constants of the pulse, in samples
const TAU_DECAY: f64 = 200.;
const TAU_RISE: f64 = 40.;

/// Bi-exponential pulse shape, zero before the trigger point.
/// Sample `i` sits at `t = i - presamples + 1`.
pub fn pulse_shape(samples: usize, presamples: u32) -> Vec<f64> {
    (0..samples)
        .map(|i| {
            let t = i as f64 - presamples as f64 + 1.;
            if t < 0. {
                0.
            } else {
                (-t / TAU_DECAY).exp() - (-t / TAU_RISE).exp()
            }
        })
        .collect()
}

/// The pulse shape narrowed to u16, built once and shared read-only
#[derive(Clone, Debug, PartialEq)]
pub struct Template(Arc<[u16]>);

impl Template {
    /// Narrowing truncates toward zero, so a shape below 1.0 becomes all zeros.
    /// Downstream consumers see exactly these values.
    pub fn build(samples: usize, presamples: u32) -> Self {
        let v: Vec<u16> = pulse_shape(samples, presamples)
            .into_iter()
            .map(|x| x as u16)
            .collect();
        Template(v.into())
    }
}

impl Deref for Template {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length() {
        assert_eq!(Template::build(1000, 200).len(), 1000);
        assert_eq!(Template::build(17, 3).len(), 17);
        assert_eq!(pulse_shape(1000, 200).len(), 1000);
    }

    #[test]
    fn zero_before_trigger() {
        let shape = pulse_shape(1000, 200);
        for (i, v) in shape.iter().enumerate() {
            if (i as i64) - 200 + 1 < 0 {
                assert_eq!(*v, 0.);
            }
        }
        let t = Template::build(1000, 200);
        assert!(t[..200].iter().all(|&x| x == 0));
    }

    #[test]
    fn rises_after_trigger() {
        let shape = pulse_shape(1000, 200);
        // t = 0 at index 199
        assert_eq!(shape[199], 0.);
        assert!(shape[200] > 0.);
        assert!(shape[201] > shape[200]);
        let peak = shape.iter().cloned().fold(0., f64::max);
        assert!(peak > 0.5 && peak < 0.54);
    }

    #[test]
    fn narrowing_truncates() {
        let t = Template::build(1000, 200);
        assert!(t.iter().all(|&x| x == 0));
    }
}
