//! Chunked homozygosity scan
//!
//! The chromosome `[0, L)` is tiled by windows of `window_size` bases, and
//! each window is split into `window_size / step` chunks. Heterozygous
//! sites are counted into the chunk that contains them, held in a
//! fixed-size ring of counters. When the scan moves past a chunk its
//! counter is folded into the running window total; when the ring wraps,
//! the window is complete, is emitted, and its chunks are retired.
//!
//! Throughout the scan:
//!
//! $$\text{window total} = \sum_{k < \text{cursor}} \text{chunk}_k$$
//!
//! and every slot at or after the cursor other than the open chunk is zero.
//!
//! Windows are produced lazily by [`HomWindows`]. A run reads its
//! [`Datum`] immutably and owns all of its state, so independent runs may
//! proceed in parallel.

use crate::analysis::window::Window;
use crate::config::WindowConfig;
use crate::error::{AggregateError, ConfigError};
use homwin_ms::Datum;
use std::iter::{Enumerate, FusedIterator};
use std::slice;
use tracing::debug;

/// Produces homozygosity windows for individuals of a [`Datum`].
///
/// # Examples
///
/// ```
/// use homwin_analysis::{WindowAggregator, WindowConfig};
/// use homwin_ms::Datum;
///
/// let datum = Datum::from_parts(40, 1, vec![0.25], vec!["0".into(), "1".into()]);
/// let aggregator = WindowAggregator::new(WindowConfig::new(500_000, 100_000).unwrap()).unwrap();
///
/// let windows: Vec<_> = aggregator.windows(&datum, 0, 1_000_000).unwrap().collect();
/// assert_eq!(windows.len(), 2);
/// assert_eq!(windows[0].homozygous, 499_999);
/// assert_eq!(windows[1].homozygous, 500_000);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowAggregator {
    config: WindowConfig,
}

impl WindowAggregator {
    pub fn new(config: WindowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Start a scan of individual `individual` over a chromosome of
    /// `chromosome_length` bases.
    ///
    /// All checks happen here, so a returned iterator never fails part-way.
    pub fn windows<'a>(
        &self,
        datum: &'a Datum,
        individual: usize,
        chromosome_length: u64,
    ) -> Result<HomWindows<'a>, AggregateError> {
        if chromosome_length == 0 {
            return Err(ConfigError::EmptyChromosome.into());
        }
        let (first, second) = datum.haplotype_pair(individual)?;

        debug!(
            generation = datum.generation(),
            individual,
            sites = datum.positions().len(),
            chromosome_length,
            window_size = self.config.window_size,
            step = self.config.step,
            "starting homozygosity scan"
        );

        Ok(HomWindows {
            sites: datum.positions().iter().enumerate(),
            first,
            second,
            ctx: ScanContext::new(&self.config, chromosome_length),
            state: ScanState::AccumulatingChunk,
        })
    }

    /// Run a scan to completion.
    pub fn collect_windows(
        &self,
        datum: &Datum,
        individual: usize,
        chromosome_length: u64,
    ) -> Result<Vec<Window>, AggregateError> {
        Ok(self.windows(datum, individual, chromosome_length)?.collect())
    }
}

/// A deduplicated site, scaled to a genome coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub position: u64,
    pub heterozygous: bool,
}

/// Where a scan is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Reading the next site into the open chunk.
    AccumulatingChunk,
    /// Rotating chunks until `pending` falls inside the open chunk, or, with
    /// no pending site, until the whole chromosome is emitted.
    WindowBoundary { pending: Option<Site> },
    /// Every window has been emitted.
    Closed,
}

/// Mutable bookkeeping of one scan.
#[derive(Debug)]
struct ScanContext {
    /// Heterozygote counters, one per chunk of the current window
    chunks: Box<[u64]>,
    /// Slot of the open chunk
    cursor: usize,
    /// First base of the open chunk
    chunk_start: u64,
    window_start: u64,
    /// Sum of the closed chunks of the current window
    window_heterozygotes: u64,
    last_position: Option<u64>,
    window_size: u64,
    step: u64,
    chromosome_length: u64,
}

impl ScanContext {
    fn new(config: &WindowConfig, chromosome_length: u64) -> Self {
        Self {
            chunks: vec![0; config.chunk_count()].into_boxed_slice(),
            cursor: 0,
            chunk_start: 0,
            window_start: 0,
            window_heterozygotes: 0,
            last_position: None,
            window_size: config.window_size,
            step: config.step,
            chromosome_length,
        }
    }

    /// Genome coordinate of a fractional position.
    #[inline]
    fn scale(&self, fraction: f64) -> u64 {
        let position = (self.chromosome_length as f64 * fraction).floor() as u64;
        position.min(self.chromosome_length - 1)
    }

    /// Exclusive end of the open chunk. Chunks are half-open like the
    /// emitted windows, so a site at exactly `chunk_end` opens the next chunk.
    #[inline]
    fn chunk_end(&self) -> u64 {
        self.chunk_start + self.step
    }

    #[inline]
    fn record_heterozygote(&mut self) {
        self.chunks[self.cursor] += 1;
    }

    fn is_exhausted(&self) -> bool {
        self.window_start >= self.chromosome_length
    }

    /// Close the open chunk and open the next one.
    ///
    /// Returns the finished window when the ring wraps.
    fn advance_chunk(&mut self) -> Option<Window> {
        debug_assert_eq!(
            self.window_heterozygotes,
            self.chunks[..self.cursor].iter().sum::<u64>()
        );

        self.window_heterozygotes += self.chunks[self.cursor];
        self.cursor = (self.cursor + 1) % self.chunks.len();
        self.chunk_start += self.step;

        if self.cursor != 0 {
            return None;
        }

        let end = (self.window_start + self.window_size).min(self.chromosome_length);
        let window = Window::new(self.window_start, end, self.window_heterozygotes);

        for slot in self.chunks.iter_mut() {
            self.window_heterozygotes -= *slot;
            *slot = 0;
        }
        debug_assert_eq!(self.window_heterozygotes, 0);
        self.window_start += self.window_size;

        Some(window)
    }

    /// Windows not yet emitted.
    fn remaining_windows(&self) -> usize {
        let left = self.chromosome_length.saturating_sub(self.window_start);
        left.div_ceil(self.window_size) as usize
    }
}

/// Lazy, single-pass sequence of windows for one individual.
///
/// Windows come out in order and tile `[0, chromosome_length)` exactly.
/// Several windows may be produced between two sites when sites are
/// sparse; windows without sites are fully homozygous.
#[derive(Debug)]
pub struct HomWindows<'a> {
    sites: Enumerate<slice::Iter<'a, f64>>,
    first: &'a [u8],
    second: &'a [u8],
    ctx: ScanContext,
    state: ScanState,
}

impl HomWindows<'_> {
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Next site that does not share a coordinate with the previous one.
    fn next_site(&mut self) -> Option<Site> {
        for (idx, &fraction) in self.sites.by_ref() {
            let position = self.ctx.scale(fraction);
            if self.ctx.last_position == Some(position) {
                continue;
            }
            self.ctx.last_position = Some(position);
            return Some(Site {
                position,
                heterozygous: self.first[idx] != self.second[idx],
            });
        }
        None
    }
}

impl Iterator for HomWindows<'_> {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        loop {
            match self.state {
                ScanState::Closed => return None,
                ScanState::AccumulatingChunk => {
                    let pending = self.next_site();
                    self.state = ScanState::WindowBoundary { pending };
                }
                ScanState::WindowBoundary {
                    pending: Some(site),
                } => {
                    if site.position >= self.ctx.chunk_end() {
                        if let Some(window) = self.ctx.advance_chunk() {
                            return Some(window);
                        }
                    } else {
                        if site.heterozygous {
                            self.ctx.record_heterozygote();
                        }
                        self.state = ScanState::AccumulatingChunk;
                    }
                }
                ScanState::WindowBoundary { pending: None } => {
                    if self.ctx.is_exhausted() {
                        self.state = ScanState::Closed;
                    } else if let Some(window) = self.ctx.advance_chunk() {
                        return Some(window);
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.state {
            ScanState::Closed => 0,
            _ => self.ctx.remaining_windows(),
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HomWindows<'_> {}

impl FusedIterator for HomWindows<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use homwin_ms::ConsistencyError;

    fn aggregator(window_size: u64, step: u64) -> WindowAggregator {
        WindowAggregator::new(WindowConfig::new(window_size, step).unwrap()).unwrap()
    }

    /// One individual whose haplotypes differ exactly at `het_sites`.
    fn single_individual(positions: Vec<f64>, het_sites: &[usize]) -> Datum {
        let first = "0".repeat(positions.len());
        let second: String = (0..positions.len())
            .map(|i| if het_sites.contains(&i) { '1' } else { '0' })
            .collect();
        Datum::from_parts(40, 1, positions, vec![first, second])
    }

    fn rows(windows: &[Window]) -> Vec<(u64, u64, u64, u64)> {
        windows
            .iter()
            .map(|w| (w.start, w.end, w.covered_bases, w.homozygous))
            .collect()
    }

    #[test]
    fn test_single_heterozygous_site() {
        let datum = single_individual(vec![0.25], &[0]);
        let windows = aggregator(500_000, 100_000)
            .collect_windows(&datum, 0, 1_000_000)
            .unwrap();

        assert_eq!(
            rows(&windows),
            vec![
                (0, 500_000, 500_000, 499_999),
                (500_000, 1_000_000, 500_000, 500_000),
            ]
        );
    }

    #[test]
    fn test_no_sites_tiles_whole_chromosome() {
        let datum = Datum::from_parts(20, 1, Vec::new(), vec![String::new(), String::new()]);
        let windows = aggregator(400, 100).collect_windows(&datum, 0, 1_000).unwrap();

        assert_eq!(
            rows(&windows),
            vec![
                (0, 400, 400, 400),
                (400, 800, 400, 400),
                (800, 1_000, 200, 200),
            ]
        );
    }

    #[test]
    fn test_homozygous_sites_do_not_count() {
        let datum = single_individual(vec![0.1, 0.2, 0.3], &[]);
        let windows = aggregator(1_000, 100).collect_windows(&datum, 0, 1_000).unwrap();
        assert_eq!(rows(&windows), vec![(0, 1_000, 1_000, 1_000)]);
    }

    #[test]
    fn test_coincident_sites_count_once() {
        // Both fractions scale to base 250; only the first is scanned.
        let datum = single_individual(vec![0.2501, 0.2502, 0.7], &[0, 1, 2]);
        let windows = aggregator(500, 100).collect_windows(&datum, 0, 1_000).unwrap();
        assert_eq!(
            rows(&windows),
            vec![(0, 500, 500, 499), (500, 1_000, 500, 499)]
        );
    }

    #[test]
    fn test_coincident_site_is_skipped_even_if_heterozygous() {
        // The first site at base 250 is homozygous, so the second one is ignored.
        let datum = single_individual(vec![0.2501, 0.2502], &[1]);
        let windows = aggregator(500, 100).collect_windows(&datum, 0, 1_000).unwrap();
        assert_eq!(windows[0].heterozygous, 0);
    }

    #[test]
    fn test_site_on_window_boundary_opens_next_window() {
        let datum = single_individual(vec![0.5], &[0]);
        let windows = aggregator(500, 100).collect_windows(&datum, 0, 1_000).unwrap();
        assert_eq!(
            rows(&windows),
            vec![(0, 500, 500, 500), (500, 1_000, 500, 499)]
        );
    }

    #[test]
    fn test_sites_spread_over_chunks_and_windows() {
        let positions = vec![0.05, 0.15, 0.35, 0.45, 0.55, 0.95];
        let datum = single_individual(positions, &[0, 1, 3, 4, 5]);
        let windows = aggregator(400, 200).collect_windows(&datum, 0, 1_000).unwrap();

        let hets: Vec<u64> = windows.iter().map(|w| w.heterozygous).collect();
        assert_eq!(hets, vec![2, 2, 1]);
        assert_eq!(windows[2].covered_bases, 200);
    }

    #[test]
    fn test_windows_larger_than_chromosome() {
        let datum = single_individual(vec![0.5], &[0]);
        let windows = WindowAggregator::default()
            .collect_windows(&datum, 0, 1_000_000)
            .unwrap();
        assert_eq!(rows(&windows), vec![(0, 1_000_000, 1_000_000, 999_999)]);
    }

    #[test]
    fn test_second_individual() {
        let datum = Datum::from_parts(
            60,
            2,
            vec![0.1, 0.6],
            vec!["00".into(), "00".into(), "01".into(), "10".into()],
        );
        let agg = aggregator(500, 100);

        let first = agg.collect_windows(&datum, 0, 1_000).unwrap();
        let second = agg.collect_windows(&datum, 1, 1_000).unwrap();

        assert_eq!(first.iter().map(|w| w.heterozygous).sum::<u64>(), 0);
        assert_eq!(
            second.iter().map(|w| w.heterozygous).collect::<Vec<_>>(),
            vec![1, 1]
        );
    }

    #[test]
    fn test_missing_haplotype_fails_before_any_window() {
        let datum = Datum::from_parts(
            40,
            2,
            vec![0.5],
            vec!["0".into(), "1".into(), "1".into()],
        );
        let err = aggregator(500, 100).windows(&datum, 0, 1_000).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::Consistency(ConsistencyError::HaplotypeCount { found: 3, .. })
        ));
    }

    #[test]
    fn test_zero_length_chromosome_rejected() {
        let datum = single_individual(Vec::new(), &[]);
        let err = aggregator(500, 100).windows(&datum, 0, 0).unwrap_err();
        assert_eq!(err, AggregateError::Config(ConfigError::EmptyChromosome));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WindowConfig {
            window_size: 500,
            step: 300,
        };
        assert!(WindowAggregator::new(config).is_err());

        let oversized = WindowConfig {
            window_size: u64::MAX / 2,
            step: 1,
        };
        assert!(matches!(
            WindowAggregator::new(oversized),
            Err(ConfigError::WindowTooLarge { .. })
        ));
    }

    #[test]
    fn test_exact_size_and_state() {
        let datum = single_individual(vec![0.25, 0.75], &[0]);
        let mut windows = aggregator(300, 100).windows(&datum, 0, 1_000).unwrap();

        assert_eq!(windows.state(), ScanState::AccumulatingChunk);
        assert_eq!(windows.len(), 4);

        windows.next().unwrap();
        assert_eq!(windows.len(), 3);

        assert_eq!(windows.by_ref().count(), 3);
        assert_eq!(windows.state(), ScanState::Closed);
        assert_eq!(windows.len(), 0);
        assert!(windows.next().is_none());
    }

    #[test]
    fn test_position_near_one_stays_on_chromosome() {
        let datum = single_individual(vec![0.999_999_999_999_999_9], &[0]);
        let windows = aggregator(500, 100).collect_windows(&datum, 0, 1_000).unwrap();
        assert_eq!(windows.last().unwrap().heterozygous, 1);
        assert_eq!(windows.last().unwrap().end, 1_000);
    }
}
