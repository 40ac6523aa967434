//! # Batch dispatcher
//!
//! Turns logically parallel host-side collections into one [`BatchResult`]:
//!
//! 1. [`validate_lengths`] checks that every batch-dimensioned collection has the same length
//!    and fails before any engine contact otherwise.
//! 2. [`dispatch`] walks the batch in input order, hands the caller's closure a freshly
//!    zeroed [`Scratch`] for every element and records one [`CallResult`] per element.
//! 3. [`BatchResult::assemble`] folds the per-element triples into parallel collections:
//!    statuses, an `N × W` numeric matrix and diagnostics.
//! 4. [`BatchResult::collapse`] presents the numeric part without its batch dimension when
//!    the batch has exactly one element.
//!
//! ## Failure model
//!
//! - Length mismatches are input-validation errors: the batch is refused as a whole and the
//!   engine is never called.
//! - Engine failures are data: a negative status on element `k` is recorded at position `k`
//!   next to its diagnostic, and the remaining elements are still processed.
//!
//! ## Example
//!
//! ```rust
//! use sweph_batch::batch::{dispatch, validate_lengths, BatchResult, NumericOutput};
//!
//! let jd = [2451545.0, 2451546.0];
//! let ipl = [0, 1];
//! let n = validate_lengths(&[("jd_ut", jd.len()), ("ipl", ipl.len())]).unwrap();
//!
//! let calls = dispatch::<6, _>("demo", n, |i, scratch| {
//!     scratch.values[0] = jd[i] + f64::from(ipl[i]);
//!     0
//! });
//! let result = BatchResult::assemble(calls);
//!
//! assert_eq!(result.len(), 2);
//! assert!(matches!(result.collapse(), NumericOutput::Matrix(m) if m.shape() == (2, 6)));
//! ```
use itertools::Itertools;
use nalgebra::{DMatrix, DVector};
use serde::{ser::SerializeSeq, Serialize, Serializer};

use crate::buffers::Scratch;
use crate::constants::Status;
use crate::sweph_errors::SwephError;

/// Check that all named collections share one length.
///
/// Arguments
/// -----------------
/// * `collections`: `(name, length)` pairs, in the order they should be reported.
///
/// Return
/// ----------
/// * The common length (0 when `collections` is empty), or
///   [`SwephError::LengthMismatch`] naming the first pair of collections that disagree.
pub fn validate_lengths(collections: &[(&'static str, usize)]) -> Result<usize, SwephError> {
    if let Some((&(left, left_len), &(right, right_len))) = collections
        .iter()
        .tuple_windows()
        .find(|((_, a), (_, b))| a != b)
    {
        return Err(SwephError::LengthMismatch {
            left,
            left_len,
            right,
            right_len,
        });
    }
    Ok(collections.first().map_or(0, |&(_, len)| len))
}

/// Outcome of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResult<const W: usize> {
    #[serde(rename = "return")]
    pub status: Status,
    #[serde(with = "serde_array")]
    pub values: [f64; W],
    pub serr: String,
}

impl<const W: usize> CallResult<W> {
    /// Read back a scratch buffer after the engine returned `status`.
    pub fn from_scratch(status: Status, scratch: &Scratch<W>) -> Self {
        CallResult {
            status,
            values: scratch.values,
            serr: scratch.serr.to_string_lossy(),
        }
    }

    /// `true` when the engine reported an error sentinel (negative status).
    pub fn is_error(&self) -> bool {
        self.status < 0
    }
}

/// Run `call` once per batch element, in input order.
///
/// Each invocation receives the element index and its own zero-initialized scratch buffers;
/// nothing is shared between elements. Engine errors do not stop the loop.
///
/// Arguments
/// -----------------
/// * `op`: operation name, used for tracing only.
/// * `len`: batch size, normally the value returned by [`validate_lengths`].
/// * `call`: performs the engine invocation for element `i` and returns its status.
pub fn dispatch<const W: usize, F>(op: &'static str, len: usize, mut call: F) -> Vec<CallResult<W>>
where
    F: FnMut(usize, &mut Scratch<W>) -> Status,
{
    let span = tracing::debug_span!("dispatch", op, batch_size = len, width = W);
    let _guard = span.enter();

    (0..len)
        .map(|i| {
            let mut scratch = Scratch::<W>::zeroed();
            let status = call(i, &mut scratch);
            let result = CallResult::from_scratch(status, &scratch);
            if result.is_error() {
                tracing::debug!(index = i, status, serr = %result.serr, "engine reported an error");
            }
            result
        })
        .collect()
}

/// Numeric output after the dimensionality rule is applied.
///
/// Serializes the way the host sees it: a flat sequence for `Vector`, one sequence per row
/// for `Matrix`.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericOutput {
    /// Single-element batch: one flat vector of the family width.
    Vector(DVector<f64>),
    /// Any other batch size: `N × W`, one row per element.
    Matrix(DMatrix<f64>),
}

impl NumericOutput {
    pub fn as_vector(&self) -> Option<&DVector<f64>> {
        match self {
            NumericOutput::Vector(v) => Some(v),
            NumericOutput::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&DMatrix<f64>> {
        match self {
            NumericOutput::Vector(_) => None,
            NumericOutput::Matrix(m) => Some(m),
        }
    }

    /// Dimensions as the host sees them: `[W]` or `[N, W]`.
    pub fn dim(&self) -> Vec<usize> {
        match self {
            NumericOutput::Vector(v) => vec![v.len()],
            NumericOutput::Matrix(m) => vec![m.nrows(), m.ncols()],
        }
    }
}

impl Serialize for NumericOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumericOutput::Vector(v) => serializer.collect_seq(v.iter()),
            NumericOutput::Matrix(m) => serialize_rows(m, serializer),
        }
    }
}

/// Parallel per-element results of a batch.
///
/// Invariant: `status.len() == values.nrows() == serr.len()`, equal to the batch size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    #[serde(rename = "return")]
    pub status: Vec<Status>,
    #[serde(rename = "xx", serialize_with = "serialize_collapsed")]
    pub values: DMatrix<f64>,
    pub serr: Vec<String>,
}

impl BatchResult {
    /// An empty batch of the given width.
    pub fn empty(width: usize) -> Self {
        BatchResult {
            status: Vec::new(),
            values: DMatrix::zeros(0, width),
            serr: Vec::new(),
        }
    }

    /// Fold per-element results into parallel collections, preserving order.
    pub fn assemble<const W: usize>(calls: Vec<CallResult<W>>) -> Self {
        let n = calls.len();
        let mut status = Vec::with_capacity(n);
        let mut serr = Vec::with_capacity(n);
        let mut flat = Vec::with_capacity(n * W);
        for call in calls {
            status.push(call.status);
            flat.extend_from_slice(&call.values);
            serr.push(call.serr);
        }
        BatchResult {
            status,
            values: DMatrix::from_row_slice(n, W, &flat),
            serr,
        }
    }

    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Number of numeric slots per element.
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// Numeric result of element `i`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.values.row(i).iter().copied().collect()
    }

    /// Indices of the elements whose status is an error sentinel.
    pub fn failed(&self) -> Vec<usize> {
        self.status.iter().positions(|&s| s < 0).collect()
    }

    /// Apply the dimensionality rule: a 1 × W batch becomes a W-vector, anything else keeps
    /// its N × W shape (including the empty batch).
    pub fn collapse(&self) -> NumericOutput {
        if self.len() == 1 {
            NumericOutput::Vector(DVector::from_iterator(
                self.width(),
                self.values.row(0).iter().copied(),
            ))
        } else {
            NumericOutput::Matrix(self.values.clone())
        }
    }
}

/// A batch whose operation rewrites a name slot in place.
///
/// `names[i]` is the name as the engine left it for element `i` (for example the canonical
/// catalog form of a star alias), not the caller's input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedBatchResult {
    #[serde(rename = "star")]
    pub names: Vec<String>,
    #[serde(flatten)]
    pub result: BatchResult,
}

/// Scalar-per-element batch (magnitudes) whose operation also rewrites a name slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeBatch {
    #[serde(rename = "return")]
    pub status: Vec<Status>,
    #[serde(rename = "star")]
    pub names: Vec<String>,
    #[serde(rename = "mag")]
    pub magnitudes: Vec<f64>,
    pub serr: Vec<String>,
}

/// Batch of values that carry a diagnostic but no status (ΔT).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueBatch {
    pub values: Vec<f64>,
    pub serr: Vec<String>,
}

fn serialize_collapsed<S: Serializer>(values: &DMatrix<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    if values.nrows() == 1 {
        return serializer.collect_seq(values.row(0).iter());
    }
    serialize_rows(values, serializer)
}

fn serialize_rows<S: Serializer>(values: &DMatrix<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.nrows()))?;
    for row in values.row_iter() {
        seq.serialize_element(&row.iter().copied().collect::<Vec<f64>>())?;
    }
    seq.end()
}

pub(crate) mod serde_array {
    use serde::Serializer;

    pub fn serialize<S: Serializer, const W: usize>(
        values: &[f64; W],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter())
    }
}

#[cfg(test)]
mod batch_test {
    use super::*;

    #[test]
    fn test_validate_lengths_ok() {
        assert_eq!(validate_lengths(&[("jd_ut", 3), ("ipl", 3)]), Ok(3));
        assert_eq!(validate_lengths(&[]), Ok(0));
        assert_eq!(validate_lengths(&[("jd", 0), ("ipl", 0)]), Ok(0));
    }

    #[test]
    fn test_validate_lengths_names_the_pair() {
        let err = validate_lengths(&[("jd_ut", 2), ("ipl", 3)]).unwrap_err();
        assert_eq!(
            err,
            SwephError::LengthMismatch {
                left: "jd_ut",
                left_len: 2,
                right: "ipl",
                right_len: 3
            }
        );
        let message = err.to_string();
        assert!(message.contains("'jd_ut' (2)"));
        assert!(message.contains("'ipl' (3)"));
    }

    #[test]
    fn test_validate_lengths_reports_first_disagreement() {
        let err = validate_lengths(&[("a", 4), ("b", 4), ("c", 1), ("d", 7)]).unwrap_err();
        assert!(matches!(
            err,
            SwephError::LengthMismatch { left: "b", right: "c", .. }
        ));
    }

    #[test]
    fn test_dispatch_gives_fresh_buffers() {
        let calls = dispatch::<3, _>("fresh", 3, |i, scratch| {
            // every element must start from zero, whatever the previous one wrote
            assert_eq!(scratch.values, [0.0; 3]);
            assert!(scratch.serr.is_empty());
            scratch.values.fill(i as f64 + 1.0);
            if i == 1 {
                scratch.serr.write_str("boom");
                return -1;
            }
            0
        });
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].values, [1.0; 3]);
        assert_eq!(calls[1].serr, "boom");
        assert!(calls[1].is_error());
        assert_eq!(calls[2].values, [3.0; 3]);
        assert_eq!(calls[2].serr, "");
    }

    #[test]
    fn test_assemble_and_collapse() {
        let calls = dispatch::<2, _>("rows", 3, |i, scratch| {
            scratch.values = [i as f64, 10.0 * i as f64];
            0
        });
        let result = BatchResult::assemble(calls);
        assert_eq!(result.len(), 3);
        assert_eq!(result.width(), 2);
        assert_eq!(result.row(2), vec![2.0, 20.0]);
        assert_eq!(result.collapse().dim(), vec![3, 2]);

        let single = BatchResult::assemble(dispatch::<2, _>("one", 1, |_, scratch| {
            scratch.values = [7.0, 8.0];
            0
        }));
        let collapsed = single.collapse();
        assert_eq!(collapsed.dim(), vec![2]);
        assert_eq!(collapsed.as_vector().unwrap().as_slice(), &[7.0, 8.0]);
    }

    #[test]
    fn test_collapsed_output_serializes_as_seen() {
        let single = BatchResult::assemble(dispatch::<2, _>("one", 1, |_, scratch| {
            scratch.values = [7.0, 8.0];
            0
        }));
        assert_eq!(serde_json::to_value(single.collapse()).unwrap(), serde_json::json!([7.0, 8.0]));

        let rows = BatchResult::assemble(dispatch::<2, _>("rows", 2, |i, scratch| {
            scratch.values = [i as f64, 10.0 * i as f64];
            0
        }));
        assert_eq!(
            serde_json::to_value(rows.collapse()).unwrap(),
            serde_json::json!([[0.0, 0.0], [1.0, 10.0]])
        );
    }

    #[test]
    fn test_empty_batch() {
        let result = BatchResult::assemble(dispatch::<6, _>("none", 0, |_, _| unreachable!()));
        assert!(result.is_empty());
        assert_eq!(result.serr.len(), 0);
        assert_eq!(result.values.shape(), (0, 6));
        assert_eq!(result, BatchResult::empty(6));
        assert_eq!(result.collapse().dim(), vec![0, 6]);
    }

    #[test]
    fn test_failed_positions() {
        let result = BatchResult::assemble(dispatch::<1, _>("mixed", 4, |i, _| {
            if i % 2 == 0 {
                0
            } else {
                -1
            }
        }));
        assert_eq!(result.failed(), vec![1, 3]);
    }
}
