use gtk4::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::models::{Lead, Message};
use crate::query;

/// Searchable lead grid. Each card shows the lead's details, a Send Text
/// button, and that lead's message history joined by phone number.
pub struct LeadList {
    root: gtk::Box,
    search: gtk::SearchEntry,
    grid: gtk::FlowBox,
    leads: RefCell<Vec<Lead>>,
    messages: RefCell<Vec<Message>>,
    on_send: RefCell<Option<Rc<dyn Fn(Lead)>>>,
}

impl LeadList {
    pub fn new() -> Rc<Self> {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some("Search by name or phone..."));
        root.append(&search);

        let grid = gtk::FlowBox::new();
        grid.set_selection_mode(gtk::SelectionMode::None);
        grid.set_homogeneous(true);
        grid.set_max_children_per_line(3);
        grid.set_column_spacing(8);
        grid.set_row_spacing(8);
        root.append(&grid);

        let this = Rc::new(Self {
            root,
            search,
            grid,
            leads: RefCell::new(Vec::new()),
            messages: RefCell::new(Vec::new()),
            on_send: RefCell::new(None),
        });

        let weak = Rc::downgrade(&this);
        this.search.connect_search_changed(move |_| {
            if let Some(list) = weak.upgrade() {
                list.rebuild();
            }
        });

        this
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn connect_send_text<F: Fn(Lead) + 'static>(&self, f: F) {
        *self.on_send.borrow_mut() = Some(Rc::new(f));
    }

    pub fn set_leads(&self, leads: Vec<Lead>) {
        *self.leads.borrow_mut() = leads;
        self.rebuild();
    }

    pub fn set_messages(&self, messages: Vec<Message>) {
        *self.messages.borrow_mut() = messages;
        self.rebuild();
    }

    fn rebuild(&self) {
        while let Some(child) = self.grid.first_child() {
            self.grid.remove(&child);
        }
        let term = self.search.text().to_string();
        let leads = self.leads.borrow();
        let messages = self.messages.borrow();
        let on_send = self.on_send.borrow().clone();
        for lead in query::filtered_leads(&leads, &term) {
            self.grid.append(&build_card(lead, &messages, on_send.clone()));
        }
    }
}

fn build_card(lead: &Lead, messages: &[Message], on_send: Option<Rc<dyn Fn(Lead)>>) -> gtk::Widget {
    let card = gtk::Box::new(gtk::Orientation::Vertical, 4);
    card.add_css_class("card");
    card.set_margin_top(4);
    card.set_margin_bottom(4);
    card.set_margin_start(4);
    card.set_margin_end(4);

    let name = gtk::Label::new(Some(&lead.name));
    name.add_css_class("heading");
    name.set_halign(gtk::Align::Start);
    card.append(&name);

    for text in [
        format!("Phone: {}", lead.phone),
        format!("Source: {}", lead.source),
        format!("Notes: {}", lead.notes),
    ] {
        let label = gtk::Label::new(Some(&text));
        label.set_halign(gtk::Align::Start);
        label.set_wrap(true);
        card.append(&label);
    }

    if let Some(date) = lead.follow_up_date.as_deref() {
        let label = gtk::Label::new(Some(&format!("Follow up: {date}")));
        label.add_css_class("dim-label");
        label.set_halign(gtk::Align::Start);
        card.append(&label);
    }

    let send_btn = gtk::Button::with_label("Send Text");
    send_btn.set_halign(gtk::Align::Start);
    if let Some(on_send) = on_send {
        let lead = lead.clone();
        send_btn.connect_clicked(move |_| (on_send)(lead.clone()));
    }
    card.append(&send_btn);

    let history = query::messages_for_lead(messages, &lead.phone);
    if !history.is_empty() {
        let header = gtk::Label::new(Some("Message History:"));
        header.add_css_class("heading");
        header.set_halign(gtk::Align::Start);
        card.append(&header);
        for msg in history {
            let label = gtk::Label::new(Some(&format!("{} - {}", msg.sent_at, msg.message)));
            label.add_css_class("dim-label");
            label.set_halign(gtk::Align::Start);
            label.set_wrap(true);
            card.append(&label);
        }
    }

    card.upcast()
}
