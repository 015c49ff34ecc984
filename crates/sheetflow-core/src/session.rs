//! UI session state the core reacts to but does not own.

use sheetflow_engine::engine::SheetId;

/// Which sheet is selected and which attribute detail panels are open.
/// Selecting a different sheet closes any open details.
#[derive(Clone, Debug, Default)]
pub struct Session {
    selected_sheet: Option<SheetId>,
    open_detail_attributes: Vec<usize>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn selected_sheet(&self) -> Option<&SheetId> {
        self.selected_sheet.as_ref()
    }

    pub fn select_sheet(&mut self, sheet: SheetId) {
        if self.selected_sheet.as_ref() != Some(&sheet) {
            self.open_detail_attributes.clear();
        }
        self.selected_sheet = Some(sheet);
    }

    pub fn clear_selection(&mut self) {
        self.selected_sheet = None;
        self.open_detail_attributes.clear();
    }

    pub fn open_detail_attributes(&self) -> &[usize] {
        &self.open_detail_attributes
    }

    pub fn open_detail(&mut self, attribute_index: usize) {
        if !self.open_detail_attributes.contains(&attribute_index) {
            self.open_detail_attributes.push(attribute_index);
        }
    }

    pub fn close_detail(&mut self, attribute_index: usize) {
        self.open_detail_attributes
            .retain(|&index| index != attribute_index);
    }
}
