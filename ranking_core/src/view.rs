//! State of the full-screen comparison view.
//!
//! The comparison shows a card next to the following one (wrapping around), with a
//! slider between them or in "blink" mode where one image is shown at a time.

use crate::board::CatalogImage;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ViewState {
    /// The card being compared, if the view is open.
    pub current_index: Option<usize>,
    pub slider_visible: bool,
    /// In blink mode, whether the current card (and not the next one) is shown.
    pub showing_first: bool,
    pub show_full_names: bool,
    pub show_initials: bool,
    pub student_mode: bool,
}

impl ViewState {
    pub fn new(student_mode: bool) -> ViewState {
        ViewState {
            current_index: None,
            slider_visible: true,
            showing_first: true,
            show_full_names: false,
            show_initials: false,
            student_mode,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current_index.is_some()
    }

    pub fn open(&mut self, index: usize) {
        self.current_index = Some(index);
    }

    pub fn close(&mut self) {
        self.current_index = None;
    }

    pub fn next(&mut self, total: usize) {
        if let (Some(idx), true) = (self.current_index, total > 0) {
            self.current_index = Some((idx + 1) % total);
        }
    }

    pub fn previous(&mut self, total: usize) {
        if let (Some(idx), true) = (self.current_index, total > 0) {
            self.current_index = Some((idx + total - 1) % total);
        }
    }

    /// The two cards on screen: the current one and the one after it.
    pub fn comparison_pair(&self, total: usize) -> Option<(usize, usize)> {
        match self.current_index {
            Some(idx) if idx < total => Some((idx, (idx + 1) % total)),
            _ => None,
        }
    }

    /// Hides the slider and flips between the two images.
    pub fn blink(&mut self) {
        self.slider_visible = false;
        self.showing_first = !self.showing_first;
    }

    pub fn show_slider(&mut self) {
        self.slider_visible = true;
    }

    /// Students never see the initials.
    pub fn toggle_initials(&mut self) {
        if self.student_mode {
            return;
        }
        self.show_initials = !self.show_initials;
    }

    pub fn initials_visible(&self) -> bool {
        self.show_initials && !self.student_mode
    }

    pub fn label_for<'a>(&self, image: &'a CatalogImage) -> &'a str {
        if self.show_full_names {
            &image.initials
        } else {
            &image.filename_number
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::process_image_files;

    #[test]
    fn navigation_wraps() {
        let mut v = ViewState::new(false);
        assert_eq!(v.comparison_pair(3), None);
        v.open(2);
        assert_eq!(v.comparison_pair(3), Some((2, 0)));
        v.next(3);
        assert_eq!(v.current_index, Some(0));
        v.previous(3);
        v.previous(3);
        assert_eq!(v.current_index, Some(1));
        v.close();
        assert!(!v.is_open());
    }

    #[test]
    fn blink_and_slider() {
        let mut v = ViewState::new(false);
        v.blink();
        assert!(!v.slider_visible);
        assert!(!v.showing_first);
        v.blink();
        assert!(v.showing_first);
        v.show_slider();
        assert!(v.slider_visible);
    }

    #[test]
    fn student_mode_hides_initials() {
        let mut admin = ViewState::new(false);
        admin.toggle_initials();
        assert!(admin.initials_visible());

        let mut student = ViewState::new(true);
        student.toggle_initials();
        assert!(!student.initials_visible());
    }

    #[test]
    fn labels() {
        let cat = process_image_files(&["bcw-525.jpg".to_string()]);
        let mut v = ViewState::new(false);
        assert_eq!(v.label_for(&cat[0]), "525");
        v.show_full_names = true;
        assert_eq!(v.label_for(&cat[0]), "bcw");
    }
}
