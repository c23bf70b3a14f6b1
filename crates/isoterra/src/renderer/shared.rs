//! Draw list hand-off between the tick thread and a painter thread.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::renderer::draw::DrawList;

/// A draw list shared between the thread that builds frames and the one
/// that paints them. Cloning shares the same list.
#[derive(Debug, Clone, Default)]
pub struct SharedDrawList {
    inner: Arc<Mutex<DrawList>>,
}

impl SharedDrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap a freshly built list in. `list` comes back holding the previous
    /// frame, ready to be cleared and rebuilt.
    pub fn publish(&self, list: &mut DrawList) {
        std::mem::swap(&mut *self.lock(), list);
    }

    /// Run `f` with the latest published list while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&DrawList) -> R) -> R {
        f(&self.lock())
    }

    // The list is plain data; a panic mid-paint cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, DrawList> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::DrawCommand;
    use std::thread;

    fn frame(sprite: u32, count: usize) -> DrawList {
        let mut list = DrawList::new();
        for _ in 0..count {
            list.push(DrawCommand {
                sprite,
                ..Default::default()
            });
        }
        list
    }

    #[test]
    fn publish_swaps_frames() {
        let shared = SharedDrawList::new();
        let mut back = frame(1, 3);
        shared.publish(&mut back);
        assert!(back.is_empty(), "previous (empty) frame comes back");
        assert_eq!(shared.read(|l| l.len()), 3);

        let mut next = frame(2, 1);
        shared.publish(&mut next);
        assert_eq!(next.len(), 3);
        assert_eq!(shared.read(|l| l.as_slice()[0].sprite), 2);
    }

    #[test]
    fn painter_thread_sees_whole_frames() {
        let shared = SharedDrawList::new();
        let painter = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.read(|list| {
                        // A frame is all one sprite; a torn read would mix them.
                        if let Some(first) = list.iter().next() {
                            assert!(list.iter().all(|c| c.sprite == first.sprite));
                        }
                    });
                }
            })
        };
        for i in 0..200 {
            let mut list = frame(i, 16);
            shared.publish(&mut list);
        }
        painter.join().unwrap();
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let shared = SharedDrawList::new();
        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            poisoner.read(|_| panic!("painter crashed"));
        })
        .join();
        let mut list = frame(9, 2);
        shared.publish(&mut list);
        assert_eq!(shared.read(|l| l.len()), 2);
    }
}
