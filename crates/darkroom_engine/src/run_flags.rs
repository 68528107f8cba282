//! Bitset telling the engine how much of the graph to execute.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// How much of the pipeline a run should execute.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RunFlags(u32);

impl RunFlags {
    /// Nothing to do.
    pub const NONE: RunFlags = RunFlags(0);
    /// Record and submit the command buffer.
    pub const RECORD_COMMANDS: RunFlags = RunFlags(1 << 0);
    /// Block until the submitted work has completed.
    pub const WAIT_DONE: RunFlags = RunFlags(1 << 1);
    /// (Re)create graph nodes before recording.
    pub const CREATE_NODES: RunFlags = RunFlags(1 << 2);
    /// Everything, from node creation to completion.
    pub const ALL: RunFlags = RunFlags(0b111);

    /// Both sets of flags; usable in `const` items.
    pub const fn union(self, other: RunFlags) -> RunFlags {
        RunFlags(self.0 | other.0)
    }

    pub const fn contains(self, other: RunFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RunFlags {
    type Output = RunFlags;

    fn bitor(self, rhs: RunFlags) -> RunFlags {
        self.union(rhs)
    }
}

impl BitOrAssign for RunFlags {
    fn bitor_assign(&mut self, rhs: RunFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for RunFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("RunFlags(NONE)");
        }
        let names = [
            (RunFlags::RECORD_COMMANDS, "RECORD_COMMANDS"),
            (RunFlags::WAIT_DONE, "WAIT_DONE"),
            (RunFlags::CREATE_NODES, "CREATE_NODES"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "RunFlags({})", set.join(" | "))
    }
}
