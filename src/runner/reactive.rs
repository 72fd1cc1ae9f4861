//! Fine-grained reactive adapter backed by futures-signals.
//!
//! The mounted state lives in a `MutableVec`; every change emits
//! `VecDiff` patches which the adapter applies to a retained row store,
//! re-rendering only the rows a patch names. Draining the patch queue
//! until the signal goes pending is this backend's paint
//! acknowledgement: once the queue is empty, everything written to the
//! state has been applied to the rendered output.

use super::{format_row, Runner, RunnerError, RunnerHandle};
use crate::data::Item;
use futures_signals::signal_vec::{MutableVec, SignalVec, VecDiff};
use smartstring::alias::String as SmartString;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

type RowSignal = Pin<Box<dyn SignalVec<Item = Item> + Send>>;

/// Factory for the fine-grained reactive adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactiveRunner;

impl Runner for ReactiveRunner {
    fn mount(&self, items: &[Item]) -> Result<Box<dyn RunnerHandle>, RunnerError> {
        let state = MutableVec::new_with_values(items.to_vec());
        let signal: RowSignal = Box::pin(state.signal_vec_cloned());
        let mut handle = ReactiveHandle {
            state: Some(state),
            signal: Some(signal),
            rows: Vec::new(),
        };
        // The first drain applies the signal's initial replace patch.
        handle.drain();
        if handle.rows.len() != items.len() {
            return Err(RunnerError::InitFailure(format!(
                "expected {} rendered rows after mount, saw {}",
                items.len(),
                handle.rows.len()
            )));
        }
        Ok(Box::new(handle))
    }
}

struct ReactiveHandle {
    /// `None` once the root has been torn down.
    state: Option<MutableVec<Item>>,
    signal: Option<RowSignal>,
    /// Retained render output, one formatted line per item.
    rows: Vec<SmartString>,
}

impl ReactiveHandle {
    /// Apply every pending patch to the row store.
    fn drain(&mut self) {
        let Some(signal) = self.signal.as_mut() else {
            return;
        };
        let mut cx = Context::from_waker(Waker::noop());
        while let Poll::Ready(Some(diff)) = signal.as_mut().poll_vec_change(&mut cx) {
            Self::apply(&mut self.rows, diff);
        }
    }

    fn apply(rows: &mut Vec<SmartString>, diff: VecDiff<Item>) {
        match diff {
            VecDiff::Replace { values } => {
                *rows = values.iter().map(format_row).collect();
            }
            VecDiff::InsertAt { index, value } => rows.insert(index, format_row(&value)),
            VecDiff::UpdateAt { index, value } => rows[index] = format_row(&value),
            VecDiff::RemoveAt { index } => {
                rows.remove(index);
            }
            VecDiff::Move {
                old_index,
                new_index,
            } => {
                let row = rows.remove(old_index);
                rows.insert(new_index, row);
            }
            VecDiff::Push { value } => rows.push(format_row(&value)),
            VecDiff::Pop {} => {
                rows.pop();
            }
            VecDiff::Clear {} => rows.clear(),
        }
    }
}

impl RunnerHandle for ReactiveHandle {
    fn replace(&mut self, items: &[Item]) -> Result<(), RunnerError> {
        let state = self.state.as_ref().ok_or(RunnerError::AlreadyTornDown)?;
        {
            let mut lock = state.lock_mut();
            if lock.len() == items.len() {
                // Same-length replacement: write only the rows whose item
                // actually changed so the emitted patches stay fine-grained.
                for (index, item) in items.iter().enumerate() {
                    if lock[index] != *item {
                        lock.set_cloned(index, item.clone());
                    }
                }
            } else {
                lock.replace_cloned(items.to_vec());
            }
        }
        self.drain();
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), RunnerError> {
        match self.state.take() {
            Some(state) => {
                state.lock_mut().clear();
                self.drain();
                self.signal = None;
                self.rows.clear();
                Ok(())
            }
            None => Err(RunnerError::AlreadyTornDown),
        }
    }

    fn rendered_rows(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{create_items, BenchCase, Mutator};

    #[test]
    fn mount_renders_every_row() {
        let items = create_items(130, 33);
        let handle = ReactiveRunner.mount(&items).expect("mount");
        assert_eq!(handle.rendered_rows(), 130);
    }

    #[test]
    fn value_updates_patch_rows_in_place() {
        let items = create_items(100, 33);
        let mut handle = ReactiveRunner.mount(&items).expect("mount");
        let mut mutator = Mutator::for_case(BenchCase::Update, 33, 10, items.len());
        let next = mutator.apply(&items);
        handle.replace(&next).expect("replace");
        assert_eq!(handle.rendered_rows(), 100);
    }

    #[test]
    fn splice_updates_change_the_row_count() {
        let items = create_items(100, 17);
        let mut handle = ReactiveRunner.mount(&items).expect("mount");
        let mut mutator = Mutator::for_case(BenchCase::Splice, 17, 1, items.len());
        let mut current = items;
        for expected in [101, 100, 101, 100] {
            current = mutator.apply(&current);
            handle.replace(&current).expect("replace");
            assert_eq!(handle.rendered_rows(), expected);
        }
    }

    #[test]
    fn patches_rewrite_only_the_rows_they_name() {
        let items = create_items(3, 9);
        let mut rows: Vec<SmartString> = Vec::new();
        ReactiveHandle::apply(
            &mut rows,
            VecDiff::Replace {
                values: items.clone(),
            },
        );
        assert_eq!(rows.len(), 3);

        let updated = Item::new(1, 999);
        ReactiveHandle::apply(
            &mut rows,
            VecDiff::UpdateAt {
                index: 1,
                value: updated.clone(),
            },
        );
        assert_eq!(rows[0], format_row(&items[0]));
        assert_eq!(rows[1], format_row(&updated));

        ReactiveHandle::apply(&mut rows, VecDiff::RemoveAt { index: 0 });
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], format_row(&updated));
    }
}
