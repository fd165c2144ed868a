use yew::prelude::*;

use crate::components::anchor_link::AnchorLink;
use crate::components::contact_form::ContactForm;
use crate::components::lazy_image::LazyImage;
use crate::components::letter_title::LetterTitle;
use crate::components::reveal::Reveal;

const SERVICES: [(&str, &str); 3] = [
    ("Corporate events", "Conferences, offsites and team celebrations planned end to end."),
    (
        "Private celebrations",
        "Weddings, anniversaries and birthdays with a single point of contact.",
    ),
    ("Brand activations", "Launches and pop-ups that put your product in front of people."),
];

const CASES: [(&str, &str, &str); 3] = [
    ("/assets/cases/summit.jpg", "/assets/cases/summit@2x.jpg 2x", "Tech summit for 800 guests"),
    ("/assets/cases/gala.jpg", "/assets/cases/gala@2x.jpg 2x", "Charity gala dinner"),
    ("/assets/cases/launch.jpg", "/assets/cases/launch@2x.jpg 2x", "Product launch night"),
];

const FALLBACK_IMAGE: &str = "/assets/cases/placeholder.jpg";

/// Section the hero button scrolls to.
const HERO_CTA_TARGET: &str = "contact";

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <main>
            <section class="hero" id="top">
                <LetterTitle />
                <p class="hero__subtitle">{"Events that people remember."}</p>
                <AnchorLink class="hero__cta" target={HERO_CTA_TARGET}>
                    {"Plan an event"}
                </AnchorLink>
            </section>

            <section class="section" id="about">
                <Reveal class="section__content">
                    <h2>{"About us"}</h2>
                    <p>
                        {"We are a small team of producers, designers and hosts. \
                          We take care of venues, suppliers and the schedule \
                          so you can enjoy the day."}
                    </p>
                </Reveal>
            </section>

            <section class="section" id="services">
                <h2>{"Services"}</h2>
                <div class="cards">
                    { for SERVICES.iter().map(|&(title, text)| html! {
                        <Reveal class="card">
                            <h3>{title}</h3>
                            <p>{text}</p>
                        </Reveal>
                    }) }
                </div>
            </section>

            <section class="section" id="cases">
                <h2>{"Cases"}</h2>
                <div class="cases">
                    { for CASES.iter().map(|&(src, srcset, caption)| html! {
                        <Reveal class="case">
                            <LazyImage
                                class="case__image"
                                src={src}
                                srcset={Some(AttrValue::from(srcset))}
                                fallback={Some(AttrValue::from(FALLBACK_IMAGE))}
                                alt={caption}
                            />
                            <p class="case__caption">{caption}</p>
                        </Reveal>
                    }) }
                </div>
            </section>

            <section class="section" id="contact">
                <Reveal class="section__content">
                    <h2>{"Get in touch"}</h2>
                    <p>{"Tell us about your event and we will reply within one business day."}</p>
                    <ContactForm />
                </Reveal>
            </section>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::anchor_link::{anchor_href, anchor_scroll_top};
    use crate::components::nav::SECTIONS;

    #[test]
    fn hero_button_scrolls_to_a_known_section() {
        assert!(SECTIONS.iter().any(|&(id, _)| id == HERO_CTA_TARGET));
        assert_eq!(anchor_href(HERO_CTA_TARGET), "#contact");
    }

    #[test]
    fn hero_button_clears_the_fixed_header() {
        let contact_top = 2_400.0;
        assert_eq!(anchor_scroll_top(contact_top), contact_top - crate::config::HEADER_OFFSET);
    }
}
