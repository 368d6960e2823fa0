use gtk4::prelude::*;
use gtk4 as gtk;

use crate::api::models::Message;

/// Global log of every sent text, in backend order.
pub struct MessageLog {
    root: gtk::Box,
    list: gtk::ListBox,
}

impl MessageLog {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.add_css_class("card");
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Message History (All)"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        root.append(&list);

        Self { root, list }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_items(&self, items: &[Message]) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for msg in items {
            let row = gtk::ListBoxRow::new();
            let entry = gtk::Box::new(gtk::Orientation::Vertical, 2);
            entry.set_margin_top(6);
            entry.set_margin_bottom(6);
            entry.set_margin_start(6);
            entry.set_margin_end(6);

            let to = gtk::Label::new(Some(&format!("To: {}", msg.phone)));
            to.set_halign(gtk::Align::Start);
            entry.append(&to);

            let body = gtk::Label::new(Some(&format!("Message: {}", msg.message)));
            body.set_halign(gtk::Align::Start);
            body.set_wrap(true);
            entry.append(&body);

            let sent = gtk::Label::new(Some(&format!("Sent: {}", msg.sent_at)));
            sent.add_css_class("dim-label");
            sent.set_halign(gtk::Align::Start);
            entry.append(&sent);

            row.set_child(Some(&entry));
            self.list.append(&row);
        }
    }
}
