//! Tap tracking: linking taps across consecutive frames into tracks.
//!
//! # Algorithm
//!
//! Within one frame run:
//!
//! 1. **Seed** a FIFO queue with every tap of the first frame.
//! 2. **Pop** a tap. Skip it if visited, otherwise start a new track with it.
//! 3. **Walk** forward one frame at a time. The nearest unvisited tap in the
//!    next frame is the growth candidate; every other unvisited tap there is
//!    queued so it can seed its own track later.
//! 4. **Link** the candidate if it is closer than `tap_epsilon`. Otherwise the
//!    track ends and the candidate is queued.
//! 5. **Stitch** short tracks onto an immediately following track.
//!
//! Traversal state is an arena indexed by `(frame index, slot)` with a
//! parallel visited set, both local to one run.

use std::collections::VecDeque;

use touchtrace_common::ClassifierConfig;
use touchtrace_detection_model::{Frame, Tap};

/// Chronologically ordered taps believed to be one finger contact.
pub type Track = Vec<Tap>;

/// Position of a tap inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TapIndex {
    frame: usize,
    slot: usize,
}

/// Per-run traversal arena.
struct RunArena<'a> {
    run: &'a [Frame],
    visited: Vec<Vec<bool>>,
}

impl<'a> RunArena<'a> {
    fn new(run: &'a [Frame]) -> Self {
        Self {
            run,
            visited: run.iter().map(|frame| vec![false; frame.taps.len()]).collect(),
        }
    }

    fn tap(&self, index: TapIndex) -> &'a Tap {
        &self.run[index.frame].taps[index.slot]
    }

    fn is_visited(&self, index: TapIndex) -> bool {
        self.visited[index.frame][index.slot]
    }

    fn visit(&mut self, index: TapIndex) {
        self.visited[index.frame][index.slot] = true;
    }

    /// Index of the frame directly after the one holding `index`, if the run has it.
    fn next_frame(&self, index: TapIndex) -> Option<usize> {
        let next = index.frame + 1;
        let expected_id = self.run[index.frame].id.checked_add(1)?;
        self.run
            .get(next)
            .filter(|frame| frame.id == expected_id)
            .map(|_| next)
    }
}

/// Link the taps of one frame run into tracks.
pub fn track_run(run: &[Frame], tap_epsilon: f64) -> Vec<Track> {
    let Some(first_frame) = run.first() else {
        return Vec::new();
    };

    let mut arena = RunArena::new(run);
    let mut queue: VecDeque<TapIndex> = (0..first_frame.taps.len())
        .map(|slot| TapIndex { frame: 0, slot })
        .collect();
    let mut tracks = Vec::new();

    while let Some(seed) = queue.pop_front() {
        if arena.is_visited(seed) {
            continue;
        }
        arena.visit(seed);

        let mut track = vec![*arena.tap(seed)];
        let mut current = seed;

        while let Some(frame) = arena.next_frame(current) {
            let current_tap = arena.tap(current);
            let mut best: Option<(TapIndex, f64)> = None;

            for slot in 0..run[frame].taps.len() {
                let index = TapIndex { frame, slot };
                if arena.is_visited(index) {
                    continue;
                }
                let distance = current_tap.distance(arena.tap(index));
                match best {
                    Some((_, best_distance)) if distance >= best_distance => {
                        queue.push_back(index);
                    }
                    Some((previous, _)) => {
                        queue.push_back(previous);
                        best = Some((index, distance));
                    }
                    None => best = Some((index, distance)),
                }
            }

            let Some((candidate, distance)) = best else {
                break;
            };

            if distance < tap_epsilon {
                arena.visit(candidate);
                track.push(*arena.tap(candidate));
                current = candidate;
            } else {
                queue.push_back(candidate);
                break;
            }
        }

        tracks.push(track);
    }

    tracks
}

/// Append short tracks' immediate successors onto them.
///
/// A track with `tap_threshold` taps or fewer absorbs the following track
/// when that track starts on the frame right after it ends. The same
/// position is re-examined after each absorption.
pub fn stitch_tracks(mut tracks: Vec<Track>, tap_threshold: usize) -> Vec<Track> {
    let mut i = 0;
    while i < tracks.len() {
        let absorbs_next = tracks[i].len() <= tap_threshold
            && match (tracks[i].last(), tracks.get(i + 1).and_then(|t| t.first())) {
                (Some(last), Some(next_first)) => {
                    last.frame_id.checked_add(1) == Some(next_first.frame_id)
                }
                _ => false,
            };

        if absorbs_next {
            let next = tracks.remove(i + 1);
            tracks[i].extend(next);
        } else {
            i += 1;
        }
    }
    tracks
}

/// Track every run and stitch fragments, concatenating results in run order.
pub fn build_tracks(runs: &[&[Frame]], config: &ClassifierConfig) -> Vec<Track> {
    let tracks: Vec<Track> = runs
        .iter()
        .flat_map(|run| {
            let tracks = track_run(run, config.tap_epsilon);
            stitch_tracks(tracks, config.tap_threshold)
        })
        .collect();

    tracing::debug!(runs = runs.len(), tracks = tracks.len(), "tap tracking");
    tracks
}
