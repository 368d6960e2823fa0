use adw::prelude::*;
use adw::Application;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::api::models::{Lead, OutgoingText};
use crate::query;
use crate::ui::followups::Followups;
use crate::ui::lead_form::LeadForm;
use crate::ui::lead_list::LeadList;
use crate::ui::message_log::MessageLog;

pub fn show_dashboard(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Leadboard")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();

    let form = Rc::new(LeadForm::new());
    let followups = Rc::new(Followups::new());
    let lead_list = LeadList::new();
    let message_log = Rc::new(MessageLog::new());

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);
    content.append(&form.widget());
    content.append(&followups.widget());
    content.append(&lead_list.widget());
    content.append(&message_log.widget());

    let scroller = gtk4::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .build();
    scroller.set_child(Some(&content));
    overlay.set_child(Some(&scroller));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Leadboard"));
    header.set_title_widget(Some(&title));
    let refresh_btn = gtk4::Button::from_icon_name("view-refresh-symbolic");
    refresh_btn.set_tooltip_text(Some("Refresh"));
    header.pack_end(&refresh_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    // Leads and messages refresh independently; they write disjoint state so
    // completion order does not matter.
    let refresh_leads: Rc<dyn Fn()> = Rc::new({
        let overlay = overlay.clone();
        let followups = followups.clone();
        let lead_list = lead_list.clone();
        move || {
            let state = crate::app::AppState::load();
            if state.backend_url.is_empty() {
                return;
            }
            let overlay = overlay.clone();
            let followups = followups.clone();
            let lead_list = lead_list.clone();
            let rx = crate::utils::run_async_to_main(async move {
                let client = ApiClient::new(&state.backend_url);
                client.leads().await
            });
            rx.attach(None, move |res| {
                match res {
                    Ok(items) => {
                        log::debug!("loaded {} leads", items.len());
                        let today = query::utc_today();
                        let due: Vec<Lead> = query::due_today(&items, &today)
                            .into_iter()
                            .cloned()
                            .collect();
                        followups.set_items(due);
                        lead_list.set_leads(items);
                    }
                    Err(err) => {
                        log::warn!("failed to load leads: {err}");
                        overlay.add_toast(adw::Toast::new(&format!("Failed to load leads: {err}")));
                    }
                }
                glib::ControlFlow::Continue
            });
        }
    });

    let refresh_messages: Rc<dyn Fn()> = Rc::new({
        let overlay = overlay.clone();
        let lead_list = lead_list.clone();
        let message_log = message_log.clone();
        move || {
            let state = crate::app::AppState::load();
            if state.backend_url.is_empty() {
                return;
            }
            let overlay = overlay.clone();
            let lead_list = lead_list.clone();
            let message_log = message_log.clone();
            let rx = crate::utils::run_async_to_main(async move {
                let client = ApiClient::new(&state.backend_url);
                client.messages().await
            });
            rx.attach(None, move |res| {
                match res {
                    Ok(items) => {
                        log::debug!("loaded {} messages", items.len());
                        message_log.set_items(&items);
                        lead_list.set_messages(items);
                    }
                    Err(err) => {
                        log::warn!("failed to load messages: {err}");
                        overlay
                            .add_toast(adw::Toast::new(&format!("Failed to load messages: {err}")));
                    }
                }
                glib::ControlFlow::Continue
            });
        }
    });

    let send_text: Rc<dyn Fn(Lead)> = Rc::new({
        let overlay = overlay.clone();
        let refresh_messages = refresh_messages.clone();
        move |lead: Lead| {
            let state = crate::app::AppState::load();
            if state.backend_url.is_empty() {
                return;
            }
            let text = OutgoingText {
                to: lead.phone.clone(),
                message: query::follow_up_text(&lead.name),
            };
            let name = lead.name.clone();
            let overlay = overlay.clone();
            let refresh_messages = refresh_messages.clone();
            let rx = crate::utils::run_async_to_main(async move {
                let client = ApiClient::new(&state.backend_url);
                client.send_text(&text).await
            });
            rx.attach(None, move |res| {
                match res {
                    Ok(()) => {
                        // Confirms the backend accepted the request, not SMS
                        // delivery.
                        overlay.add_toast(adw::Toast::new(&format!("Text sent to {name}")));
                        (refresh_messages)();
                    }
                    Err(err) => {
                        log::warn!("failed to send text to {name}: {err}");
                        overlay.add_toast(adw::Toast::new(&format!("Failed to send text: {err}")));
                    }
                }
                glib::ControlFlow::Continue
            });
        }
    });

    {
        let send_text = send_text.clone();
        followups.connect_send_text(move |lead| (send_text)(lead));
    }
    {
        let send_text = send_text.clone();
        lead_list.connect_send_text(move |lead| (send_text)(lead));
    }

    {
        let overlay = overlay.clone();
        let form_for_submit = form.clone();
        let refresh_leads = refresh_leads.clone();
        form.connect_submit(move || {
            let state = crate::app::AppState::load();
            if state.backend_url.is_empty() {
                return;
            }
            let draft = form_for_submit.draft();
            let overlay = overlay.clone();
            let form = form_for_submit.clone();
            let refresh_leads = refresh_leads.clone();
            let rx = crate::utils::run_async_to_main(async move {
                let client = ApiClient::new(&state.backend_url);
                client.create_lead(&draft).await
            });
            rx.attach(None, move |res| {
                // The draft is cleared and the list re-fetched either way;
                // failures additionally surface a toast.
                if let Err(err) = res {
                    log::warn!("failed to create lead: {err}");
                    overlay.add_toast(adw::Toast::new(&format!("Failed to add lead: {err}")));
                }
                form.clear();
                (refresh_leads)();
                glib::ControlFlow::Continue
            });
        });
    }

    {
        let refresh_leads = refresh_leads.clone();
        let refresh_messages = refresh_messages.clone();
        refresh_btn.connect_clicked(move |_| {
            (refresh_leads)();
            (refresh_messages)();
        });
    }

    (refresh_leads)();
    (refresh_messages)();
}
