//! Decoding of the TUV text report
//!
//! With `lmmech = T` the binary writes a line-oriented report:
//!
//! ```text
//! header        19 lines
//! flux block   310 lines
//! sub-header     3 lines
//! reactions     label / rate / label / rate / ...
//! ```
//!
//! Zero-length lines are dropped before counting. [`ReportLayout`] holds the line
//! counts so that a binary built with a different configuration only needs a
//! different layout, not a different decoder.

use crate::errors::{TuvError, TuvResult};
use crate::parameters::FloatValue;
use crate::rates::PhotolysisRates;
use serde::{Deserialize, Serialize};

/// Trimmed lines of one TUV run's standard output
///
/// Zero-length lines are dropped before trimming, so a line holding only
/// spaces is kept as `""`. The layout line counts rely on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReport {
    lines: Vec<String>,
}

impl RawReport {
    pub fn from_stdout(stdout: &str) -> Self {
        Self {
            lines: stdout
                .lines()
                .filter(|line| !line.is_empty())
                .map(|line| line.trim().to_string())
                .collect(),
        }
    }

    /// Build a report from lines that are already trimmed and non-empty
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Line counts of the fixed regions of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Lines before the flux block
    /// default: 19
    pub header_lines: usize,

    /// Spectral flux lines
    /// default: 310
    pub flux_lines: usize,

    /// Lines between the flux block and the first reaction label
    /// default: 3
    pub subheader_lines: usize,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            header_lines: 19,
            flux_lines: 310,
            subheader_lines: 3,
        }
    }
}

impl ReportLayout {
    /// Index of the first line of the reaction-rate block
    ///
    /// Fails if the line counts overflow `usize`.
    pub fn reaction_block_start(&self) -> TuvResult<usize> {
        self.header_lines
            .checked_add(self.flux_lines)
            .and_then(|n| n.checked_add(self.subheader_lines))
            .ok_or_else(|| TuvError::Config(format!("report layout overflows: {:?}", self)))
    }

    /// Minimum report length for a block holding `n_pairs` reactions
    pub fn required_lines(&self, n_pairs: usize) -> TuvResult<usize> {
        n_pairs
            .checked_mul(2)
            .and_then(|n| n.checked_add(self.reaction_block_start().ok()?))
            .ok_or_else(|| TuvError::Config(format!("report layout overflows: {:?}", self)))
    }

    pub fn validate(&self) -> TuvResult<()> {
        self.reaction_block_start().map(|_| ())
    }
}

/// One decoded entry of the reaction-rate block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRate {
    /// Reaction label as printed by TUV, informational only
    pub label: String,
    /// unit: s^-1
    pub rate: FloatValue,
}

/// A structurally decoded TUV report
#[derive(Debug, Clone, PartialEq)]
pub struct TuvReport {
    flux: Vec<String>,
    reactions: Vec<ReactionRate>,
}

impl TuvReport {
    /// Split a report into its flux block and reaction pairs
    ///
    /// Fails if the report does not reach the reaction-rate block, if the
    /// block has an odd number of lines, or if a rate is not a float.
    pub fn parse(report: &RawReport, layout: &ReportLayout) -> TuvResult<Self> {
        let lines = report.lines();
        let start = layout.reaction_block_start()?;
        if lines.len() < start {
            return Err(TuvError::MalformedReport(format!(
                "report has {} lines, expected at least {} before the reaction-rate block",
                lines.len(),
                start
            )));
        }

        let flux_start = layout.header_lines;
        let flux = lines[flux_start..flux_start + layout.flux_lines].to_vec();

        let block = &lines[start..];
        if block.len() % 2 != 0 {
            return Err(TuvError::MalformedReport(format!(
                "reaction-rate block has an odd number of lines ({})",
                block.len()
            )));
        }

        let reactions = block
            .chunks_exact(2)
            .enumerate()
            .map(|(position, pair)| {
                let rate = pair[1].parse::<FloatValue>().map_err(|_| {
                    TuvError::MalformedReport(format!(
                        "rate {:?} of reaction {} ({}) is not a number",
                        pair[1], position, pair[0]
                    ))
                })?;
                Ok(ReactionRate {
                    label: pair[0].clone(),
                    rate,
                })
            })
            .collect::<TuvResult<Vec<_>>>()?;

        Ok(Self { flux, reactions })
    }

    /// Raw lines of the spectral flux block
    pub fn flux_lines(&self) -> &[String] {
        &self.flux
    }

    /// Reaction pairs in block order
    pub fn reactions(&self) -> &[ReactionRate] {
        &self.reactions
    }

    /// First reaction whose label matches exactly
    pub fn reaction_by_label(&self, label: &str) -> Option<&ReactionRate> {
        self.reactions.iter().find(|r| r.label == label)
    }

    /// Select the named photolysis rates by pair position
    pub fn photolysis_rates(&self) -> TuvResult<PhotolysisRates> {
        let pair_rates: Vec<FloatValue> = self.reactions.iter().map(|r| r.rate).collect();
        PhotolysisRates::from_pair_rates(&pair_rates)
    }
}

/// Decode the photolysis rates from a raw report
pub fn decode_report(report: &RawReport, layout: &ReportLayout) -> TuvResult<PhotolysisRates> {
    TuvReport::parse(report, layout)?.photolysis_rates()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::PhotolysisKey;
    use is_close::is_close;

    /// Synthetic report with filler regions and `n_pairs` reactions.
    ///
    /// Pair `i` is labelled `R{i}` and has rate `i * 1e-5`, except pair 1
    /// which is `("X_O1D", "1.230e-03")`.
    fn synthetic_lines(n_pairs: usize) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend((0..19).map(|i| format!("header {}", i)));
        lines.extend((0..310).map(|i| format!("{} 0.0 0.0", 280 + i)));
        lines.extend((0..3).map(|i| format!("sub-header {}", i)));
        for i in 0..n_pairs {
            if i == 1 {
                lines.push("X_O1D".to_string());
                lines.push("1.230e-03".to_string());
            } else {
                lines.push(format!("R{}", i));
                lines.push(format!("{:e}", i as f64 * 1e-5));
            }
        }
        lines
    }

    fn synthetic_report(n_pairs: usize) -> RawReport {
        RawReport::from_lines(synthetic_lines(n_pairs))
    }

    #[test]
    fn test_decode_o1d() {
        let rates = decode_report(&synthetic_report(56), &ReportLayout::default()).unwrap();
        assert_eq!(rates.get(PhotolysisKey::O1d), 1.230e-03);
        assert!(is_close!(rates.get(PhotolysisKey::Biace), 55e-5));
        assert_eq!(rates.get(PhotolysisKey::Afg1), 0.0);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let report = synthetic_report(60);
        let layout = ReportLayout::default();
        assert_eq!(
            decode_report(&report, &layout).unwrap(),
            decode_report(&report, &layout).unwrap()
        );
    }

    #[test]
    fn test_odd_block_is_malformed() {
        for n_pairs in [0, 10, 56] {
            let mut lines = synthetic_lines(n_pairs);
            lines.push("dangling label".to_string());
            let err = decode_report(&RawReport::from_lines(lines), &ReportLayout::default())
                .unwrap_err();
            assert!(matches!(err, TuvError::MalformedReport(_)), "{}", n_pairs);
        }
    }

    #[test]
    fn test_short_report_is_malformed() {
        let layout = ReportLayout::default();
        let required = layout.required_lines(56).unwrap();
        assert_eq!(required, 19 + 310 + 3 + 2 * 56);

        let lines = synthetic_lines(56);
        for len in [0, 19, 328, 332, required - 2, required - 1] {
            let report = RawReport::from_lines(lines[..len].to_vec());
            let err = decode_report(&report, &layout).unwrap_err();
            assert!(matches!(err, TuvError::MalformedReport(_)), "{}", len);
        }
        assert!(decode_report(&RawReport::from_lines(lines), &layout).is_ok());
    }

    #[test]
    fn test_unparseable_rate_is_malformed() {
        let mut lines = synthetic_lines(56);
        let last = lines.len() - 1;
        lines[last] = "NaN-ish".to_string();
        let err =
            decode_report(&RawReport::from_lines(lines), &ReportLayout::default()).unwrap_err();
        assert!(err.to_string().contains("NaN-ish"));
    }

    #[test]
    fn test_selection_ignores_labels() {
        let mut lines = synthetic_lines(56);
        let start = ReportLayout::default().reaction_block_start().unwrap();
        // Relabel pair 5 with another species; position still decides
        lines[start + 10] = "X_O1D".to_string();
        let rates =
            decode_report(&RawReport::from_lines(lines), &ReportLayout::default()).unwrap();
        assert!(is_close!(rates.get(PhotolysisKey::No2), 5e-5));
        assert_eq!(rates.get(PhotolysisKey::O1d), 1.230e-03);
    }

    #[test]
    fn test_parse_exposes_flux_and_labels() {
        let report = TuvReport::parse(&synthetic_report(56), &ReportLayout::default()).unwrap();
        assert_eq!(report.flux_lines().len(), 310);
        assert_eq!(report.flux_lines()[0], "280 0.0 0.0");
        assert_eq!(report.reactions().len(), 56);
        assert_eq!(report.reaction_by_label("X_O1D").unwrap().rate, 1.230e-03);
        assert!(report.reaction_by_label("missing").is_none());
    }

    #[test]
    fn test_parse_allows_empty_reaction_block() {
        let report = TuvReport::parse(&synthetic_report(0), &ReportLayout::default()).unwrap();
        assert!(report.reactions().is_empty());
        assert!(report.photolysis_rates().is_err());
    }

    #[test]
    fn test_from_stdout_trims_and_drops_blank_lines() {
        let report = RawReport::from_stdout("  a  \n\nb\n   \n");
        // Whitespace-only lines survive the emptiness check but trim to ""
        assert_eq!(report.lines(), ["a", "b", ""]);
    }

    #[test]
    fn test_custom_layout() {
        let layout = ReportLayout {
            header_lines: 1,
            flux_lines: 2,
            subheader_lines: 0,
        };
        let mut lines = vec!["h".to_string(), "f1".to_string(), "f2".to_string()];
        for i in 0..56 {
            lines.push(format!("R{}", i));
            lines.push(format!("{}", i));
        }
        let rates = decode_report(&RawReport::from_lines(lines), &layout).unwrap();
        assert_eq!(rates.get(PhotolysisKey::Pan), 37.0);
    }

    #[test]
    fn test_overflowing_layout_is_an_error() {
        let layout: ReportLayout = toml::from_str(
            "header_lines = 9223372036854775807\nflux_lines = 9223372036854775807",
        )
        .unwrap();
        assert!(matches!(layout.validate(), Err(TuvError::Config(_))));
        assert!(layout.required_lines(56).is_err());

        let report = RawReport::from_lines((0..10).map(|i| i.to_string()).collect());
        let err = decode_report(&report, &layout).unwrap_err();
        assert!(matches!(err, TuvError::Config(_)));
    }

    #[test]
    fn test_required_lines_overflow() {
        let layout = ReportLayout::default();
        assert!(layout.required_lines(usize::MAX / 2 + 1).is_err());
        assert!(layout.required_lines(usize::MAX / 2).is_err());
        assert_eq!(layout.required_lines(0).unwrap(), 332);
    }

    #[test]
    fn test_layout_toml_defaults() {
        let layout: ReportLayout = toml::from_str("flux_lines = 100").unwrap();
        assert_eq!(layout.header_lines, 19);
        assert_eq!(layout.flux_lines, 100);
        assert_eq!(layout.subheader_lines, 3);
    }
}
