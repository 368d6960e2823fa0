use gtk4::prelude::*;
use gtk4 as gtk;

use crate::api::models::NewLeadDraft;

/// Add-lead form. Four free-text fields, no validation; the draft is posted
/// as typed and cleared after submission.
pub struct LeadForm {
    root: gtk::Box,
    name_entry: gtk::Entry,
    phone_entry: gtk::Entry,
    source_entry: gtk::Entry,
    notes_view: gtk::TextView,
    add_btn: gtk::Button,
}

impl LeadForm {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
        root.add_css_class("card");
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Add New Lead"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let name_entry = gtk::Entry::new();
        name_entry.set_placeholder_text(Some("Name"));
        root.append(&name_entry);

        let phone_entry = gtk::Entry::new();
        phone_entry.set_placeholder_text(Some("Phone"));
        root.append(&phone_entry);

        let source_entry = gtk::Entry::new();
        source_entry.set_placeholder_text(Some("Source"));
        root.append(&source_entry);

        let notes_view = gtk::TextView::new();
        notes_view.set_wrap_mode(gtk::WrapMode::WordChar);
        let notes_frame = gtk::Frame::new(Some("Notes"));
        notes_frame.set_child(Some(&notes_view));
        notes_view.set_top_margin(4);
        notes_view.set_bottom_margin(4);
        notes_view.set_left_margin(4);
        notes_view.set_right_margin(4);
        root.append(&notes_frame);

        let add_btn = gtk::Button::with_label("Add Lead");
        add_btn.add_css_class("suggested-action");
        add_btn.set_halign(gtk::Align::End);
        root.append(&add_btn);

        Self { root, name_entry, phone_entry, source_entry, notes_view, add_btn }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn draft(&self) -> NewLeadDraft {
        let buffer = self.notes_view.buffer();
        let notes = buffer
            .text(&buffer.start_iter(), &buffer.end_iter(), false)
            .to_string();
        NewLeadDraft {
            name: self.name_entry.text().to_string(),
            phone: self.phone_entry.text().to_string(),
            source: self.source_entry.text().to_string(),
            notes,
        }
    }

    pub fn clear(&self) {
        self.name_entry.set_text("");
        self.phone_entry.set_text("");
        self.source_entry.set_text("");
        self.notes_view.buffer().set_text("");
    }

    pub fn connect_submit<F: Fn() + 'static>(&self, f: F) {
        use std::rc::Rc;
        let submit: Rc<dyn Fn()> = Rc::new(f);
        {
            let submit = submit.clone();
            self.add_btn.connect_clicked(move |_| (submit)());
        }
        for entry in [&self.name_entry, &self.phone_entry, &self.source_entry] {
            let submit = submit.clone();
            entry.connect_activate(move |_| (submit)());
        }
    }
}
