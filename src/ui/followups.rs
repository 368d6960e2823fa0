use gtk4::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::models::Lead;

/// "Follow-Ups Due Today" panel. Hidden entirely when nothing is due.
pub struct Followups {
    root: gtk::Box,
    list: gtk::ListBox,
    on_send: RefCell<Option<Rc<dyn Fn(Lead)>>>,
}

impl Followups {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.add_css_class("card");
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_visible(false);

        let title = gtk::Label::new(Some("Follow-Ups Due Today"));
        title.add_css_class("heading");
        title.add_css_class("warning");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        root.append(&list);

        Self { root, list, on_send: RefCell::new(None) }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn connect_send_text<F: Fn(Lead) + 'static>(&self, f: F) {
        *self.on_send.borrow_mut() = Some(Rc::new(f));
    }

    pub fn set_items(&self, items: Vec<Lead>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        self.root.set_visible(!items.is_empty());
        let on_send = self.on_send.borrow().clone();
        for lead in items {
            let row = gtk::ListBoxRow::new();
            let line = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            line.set_margin_top(6);
            line.set_margin_bottom(6);
            line.set_margin_start(6);
            line.set_margin_end(6);

            let label = gtk::Label::new(Some(&format!(
                "{} - {} ({})",
                lead.name, lead.phone, lead.source
            )));
            label.set_halign(gtk::Align::Start);
            label.set_hexpand(true);
            line.append(&label);

            let send_btn = gtk::Button::with_label("Send Text");
            if let Some(on_send) = on_send.clone() {
                let lead = lead.clone();
                send_btn.connect_clicked(move |_| (on_send)(lead.clone()));
            }
            line.append(&send_btn);

            row.set_child(Some(&line));
            self.list.append(&row);
        }
    }
}
