use crate::color::{palette_index, PALETTE, PALETTE_COLUMNS};
use crate::icons::{catalog_index, CATALOG};
use crate::models::HostKind;

pub const ICON_COLUMNS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerFocus {
    Icons,
    Colors,
}

/// Icon + color picker of a host, preselected from its stored settings.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub host: String,
    pub kind: HostKind,
    pub icon_index: usize,
    pub color_index: usize,
    pub focus: PickerFocus,
}

fn step(index: usize, len: usize, columns: usize, dx: isize, dy: isize) -> usize {
    let target = index as isize + dx + dy * columns as isize;
    if target < 0 || target >= len as isize {
        index
    } else {
        target as usize
    }
}

impl PickerState {
    pub fn new(host: &str, kind: HostKind, icon: &str, color: &str) -> Self {
        PickerState {
            host: host.to_string(),
            kind,
            icon_index: catalog_index(icon),
            color_index: palette_index(color),
            focus: PickerFocus::Icons,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PickerFocus::Icons => PickerFocus::Colors,
            PickerFocus::Colors => PickerFocus::Icons,
        };
    }

    pub fn move_by(&mut self, dx: isize, dy: isize) {
        match self.focus {
            PickerFocus::Icons => self.icon_index = step(self.icon_index, CATALOG.len(), ICON_COLUMNS, dx, dy),
            PickerFocus::Colors => self.color_index = step(self.color_index, PALETTE.len(), PALETTE_COLUMNS, dx, dy),
        }
    }

    pub fn icon(&self) -> String {
        format!("lucide:{}", CATALOG[self.icon_index].0)
    }

    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index]
    }
}

/// Palette grid used for section colors.
#[derive(Debug, Clone, Copy)]
pub struct PaletteState {
    pub kind: HostKind,
    pub index: usize,
}

impl PaletteState {
    pub fn new(kind: HostKind, current: &str) -> Self {
        PaletteState { kind, index: palette_index(current) }
    }

    pub fn move_by(&mut self, dx: isize, dy: isize) {
        self.index = step(self.index, PALETTE.len(), PALETTE_COLUMNS, dx, dy);
    }

    pub fn color(&self) -> &'static str {
        PALETTE[self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preselects_stored_values() {
        let p = PickerState::new("orion", HostKind::Ssh, "lucide:home", "#43aa8b");
        assert_eq!(p.icon(), "lucide:home");
        assert_eq!(p.color(), "#43aa8b");

        let p = PickerState::new("orion", HostKind::Ssh, "", "#123456");
        assert_eq!(p.icon(), "lucide:server");
        assert_eq!(p.color(), "");
    }

    #[test]
    fn movement_stays_inside_the_grid() {
        let mut p = PaletteState::new(HostKind::Ssh, "");
        p.move_by(-1, 0);
        assert_eq!(p.index, 0);
        p.move_by(0, 1);
        assert_eq!(p.index, PALETTE_COLUMNS);
        p.move_by(0, 10);
        assert_eq!(p.index, PALETTE_COLUMNS);
    }

    #[test]
    fn tab_switches_between_grids() {
        let mut p = PickerState::new("orion", HostKind::Wsl, "", "");
        p.toggle_focus();
        p.move_by(1, 0);
        assert_eq!(p.color_index, 1);
        assert_eq!(p.icon_index, 0);
    }
}
