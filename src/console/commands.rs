//! Command table
//!
//! The application builds a `static` slice of [`CommandDescriptor`] before the
//! console exists and hands it to [`CommandTable::new`]. The table never
//! changes afterwards. Table order is also the index space used by
//! [`Category::Member`].

use super::error::TableError;
use super::pattern;

/// Command identifier, unique within a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub u16);

impl CommandId {
    pub const BOOT: Self = Self(9991);
    pub const MACRO: Self = Self(9992);
    pub const RUN: Self = Self(9993);
    pub const MACROS: Self = Self(9994);
    pub const ECHO: Self = Self(9995);
    pub const BOLD: Self = Self(9996);
    pub const CLS: Self = Self(9997);
    pub const IDLE: Self = Self(9998);
    pub const HELP: Self = Self(9999);

    /// True for ids the console executes itself
    pub fn is_builtin(self) -> bool {
        (Self::BOOT.0..=Self::HELP.0).contains(&self.0)
    }
}

impl core::fmt::Display for CommandId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visibility class of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Subsystem root: invoking it without arguments activates the subsystem
    Subsystem,
    /// Available regardless of the active subsystem
    Global,
    /// Dispatchable but left out of help listings
    Hidden,
    /// Belongs to the subsystem root at this table index
    Member(usize),
}

/// Command descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub category: Category,
    pub id: CommandId,
    /// Parameter pattern, e.g. `"%i %s"`
    pub pattern: &'static str,
    pub description: &'static str,
    pub param_description: &'static str,
}

impl CommandDescriptor {
    pub const fn new(
        name: &'static str,
        category: Category,
        id: CommandId,
        pattern: &'static str,
        description: &'static str,
        param_description: &'static str,
    ) -> Self {
        Self { name, category, id, pattern, description, param_description }
    }

    /// Number of parameters the pattern expects
    pub fn param_count(&self) -> usize {
        pattern::count(self.pattern)
    }

    /// Visible when `active` is the current subsystem
    pub fn in_scope(&self, active: Option<usize>) -> bool {
        match self.category {
            Category::Member(owner) => active == Some(owner),
            _ => true,
        }
    }
}

// Built-in commands. Idle and Help are mandatory, the rest optional.

pub const BOOT: CommandDescriptor =
    CommandDescriptor::new("Boot", Category::Global, CommandId::BOOT, "", "Boot", "");
pub const MACRO: CommandDescriptor = CommandDescriptor::new(
    "Macro",
    Category::Global,
    CommandId::MACRO,
    "%s",
    "Define macro (sp->_, cr->|)",
    "command(s)",
);
pub const RUN: CommandDescriptor =
    CommandDescriptor::new("Run", Category::Global, CommandId::RUN, "", "Run a macro", "");
pub const MACROS: CommandDescriptor =
    CommandDescriptor::new("Macros", Category::Global, CommandId::MACROS, "", "List macro(s)", "");
pub const ECHO: CommandDescriptor = CommandDescriptor::new(
    "Echo",
    Category::Global,
    CommandId::ECHO,
    "%bu",
    "Echo On|Off (1|0)",
    "state",
);
pub const BOLD: CommandDescriptor = CommandDescriptor::new(
    "Bold",
    Category::Global,
    CommandId::BOLD,
    "%bu",
    "Bold On|Off (1|0)",
    "state",
);
pub const CLS: CommandDescriptor = CommandDescriptor::new(
    "Cls",
    Category::Global,
    CommandId::CLS,
    "",
    "Clears the terminal screen",
    "",
);
pub const IDLE: CommandDescriptor = CommandDescriptor::new(
    "Idle",
    Category::Global,
    CommandId::IDLE,
    "",
    "Deselect Subsystems",
    "",
);
pub const HELP: CommandDescriptor =
    CommandDescriptor::new("Help", Category::Global, CommandId::HELP, "%s", "Help", "");

/// Validated, read-only command table
#[derive(Debug, Clone, Copy)]
pub struct CommandTable {
    cmds: &'static [CommandDescriptor],
}

impl CommandTable {
    /// Validate and wrap a descriptor slice
    pub fn new(cmds: &'static [CommandDescriptor]) -> Result<Self, TableError> {
        if cmds.is_empty() {
            return Err(TableError::Empty);
        }

        for (i, cmd) in cmds.iter().enumerate() {
            if cmds[..i].iter().any(|c| c.id == cmd.id) {
                return Err(TableError::DuplicateId(cmd.id.0));
            }

            if let Category::Member(owner) = cmd.category {
                let is_root = cmds
                    .get(owner)
                    .is_some_and(|c| c.category == Category::Subsystem);
                if !is_root {
                    return Err(TableError::BadSubsystem { name: cmd.name, index: owner });
                }
            }

            if pattern::count(cmd.pattern) > crate::config::MAX_ARGS {
                return Err(TableError::TooManyParams(cmd.name));
            }
            if !pattern::is_valid(cmd.pattern) {
                return Err(TableError::BadPattern(cmd.name));
            }
        }

        for required in [IDLE, HELP] {
            if !cmds.iter().any(|c| c.id == required.id) {
                return Err(TableError::MissingMandatory(required.name));
            }
        }

        Ok(Self { cmds })
    }

    /// Find a command by name, case-insensitive, within the active subsystem
    pub fn find_by_name(&self, name: &str, active: Option<usize>) -> Option<usize> {
        self.cmds
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name) && c.in_scope(active))
    }

    /// Table index of a command id
    pub fn index_of(&self, id: CommandId) -> Option<usize> {
        self.cmds.iter().position(|c| c.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&'static CommandDescriptor> {
        let cmds = self.cmds;
        cmds.get(index)
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'static, CommandDescriptor> {
        let cmds = self.cmds;
        cmds.iter()
    }

    /// All command names, in table order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|c| c.name)
    }
}
