use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;

/// First-run window: ask for the backend URL, probe it, save it, then open
/// the dashboard. An unreachable backend is reported but still saved.
pub fn show_setup_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Leadboard Setup")
        .default_width(420)
        .default_height(220)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Connect to your CRM backend"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let url_entry = gtk::Entry::new();
    url_entry.set_placeholder_text(Some("Backend URL (e.g. https://crm.example.com)"));
    url_entry.set_hexpand(true);
    root.append(&url_entry);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    let connect_btn = gtk::Button::with_label("Connect");
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some("Leadboard"));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let on_connect = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let url_entry = url_entry.clone();
        move || {
            let overlay = overlay.clone();
            let url = crate::utils::normalize_url(&url_entry.text());
            if url_entry.text().trim().is_empty() {
                overlay.add_toast(adw::Toast::new("Please enter the backend URL."));
                return;
            }
            if url::Url::parse(&url).is_err() {
                overlay.add_toast(adw::Toast::new("That does not look like a valid URL."));
                return;
            }

            status.set_label("Connecting…");

            let url_for_async = url.clone();
            let rx: glib::Receiver<Result<(String, String), String>> =
                crate::utils::run_async_to_main(async move {
                    let client = crate::api::client::ApiClient::with_timeout(
                        &url_for_async,
                        std::time::Duration::from_secs(5),
                    )
                    .map_err(|e| e.to_string())?;
                    match client.leads().await {
                        Ok(_) => Ok((url_for_async, "Connected".to_string())),
                        // Save the URL anyway; the backend may simply be down.
                        Err(e) => {
                            log::warn!("backend probe failed: {e}");
                            Ok((url_for_async, "Saved (backend unreachable)".to_string()))
                        }
                    }
                });

            let status_label = status.clone();
            let app2 = app.clone();
            let window2 = window.clone();
            let overlay2 = overlay.clone();
            rx.attach(None, move |res| {
                match res {
                    Ok((backend_url, message)) => {
                        status_label.set_label(&message);
                        let mut st = crate::app::AppState::load();
                        st.backend_url = backend_url;
                        if let Err(e) = st.save() {
                            log::error!("failed to save config: {e}");
                            overlay2.add_toast(adw::Toast::new(&format!(
                                "Failed to save settings: {}",
                                e
                            )));
                        }
                        crate::ui::dashboard::show_dashboard(&app2);
                        window2.close();
                    }
                    Err(err) => {
                        log::warn!("backend check failed: {err}");
                        status_label.set_label("Connection failed");
                        overlay2.add_toast(adw::Toast::new("Could not reach the backend. Check the URL."));
                    }
                }
                glib::ControlFlow::Continue
            });
        }
    };

    use std::rc::Rc;
    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    {
        let on_connect = on_connect.clone();
        url_entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}
