//! One `Page` per document: it mounts every widget the markup carries
//! and owns their handles until `dispose` drops it.

use web_sys::Document;

use crate::widgets::counter::Counters;
use crate::widgets::lead::LeadForm;
use crate::widgets::modal::TrialModal;
use crate::widgets::nav::MenuToggle;
use crate::widgets::newsletter::Newsletter;
use crate::widgets::quote::QuoteForm;
use crate::widgets::reveal::Reveal;
use crate::widgets::slider::Slider;
use crate::widgets::splash::Splash;
use crate::widgets::typewriter::Typewriter;

pub struct Page {
    splash: Option<Splash>,
    menu: Option<MenuToggle>,
    quote: Option<QuoteForm>,
    typewriter: Option<Typewriter>,
    modal: Option<TrialModal>,
    lead: Option<LeadForm>,
    newsletter: Option<Newsletter>,
    slider: Option<Slider>,
    counters: Option<Counters>,
    reveal: Option<Reveal>,
}

impl Page {
    /// Every widget decides for itself whether the markup it needs is
    /// present; a page with none of it still mounts cleanly.
    pub fn mount(document: &Document) -> Self {
        let page = Self {
            splash: Splash::mount(document),
            menu: MenuToggle::mount(document),
            quote: QuoteForm::mount(document),
            typewriter: Typewriter::mount(document),
            modal: TrialModal::mount(document),
            lead: LeadForm::mount(document),
            newsletter: Newsletter::mount(document),
            slider: Slider::mount(document),
            counters: Counters::mount(document),
            reveal: Reveal::mount(document),
        };
        let bound = page.bound();
        if bound.is_empty() {
            log::info!("no widget markup on this page");
        } else {
            log::info!("bound widgets: {}", bound.join(", "));
        }
        page
    }

    fn bound(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.splash.is_some() {
            names.push("splash");
        }
        if self.menu.is_some() {
            names.push("menu");
        }
        if self.quote.is_some() {
            names.push("quote");
        }
        if self.typewriter.is_some() {
            names.push("typewriter");
        }
        if self.modal.is_some() {
            names.push("modal");
        }
        if self.lead.is_some() {
            names.push("lead");
        }
        if self.newsletter.is_some() {
            names.push("newsletter");
        }
        if self.slider.is_some() {
            names.push("slider");
        }
        if self.counters.is_some() {
            names.push("counters");
        }
        if self.reveal.is_some() {
            names.push("reveal");
        }
        names
    }
}
