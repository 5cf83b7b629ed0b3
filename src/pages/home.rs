use log::{error, info};
use web_sys::{Element, MouseEvent, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

use crate::animation::hero::HeroAnimation;
use crate::components::whatsapp_link::WhatsappLink;
use crate::config;

pub const TITLE: &str = "SOLAIRE";
pub const SUBTITLE: &str = "MICROGERAÇÃO | MINIGERAÇÃO | HOMOLOGAÇÃO";

const SERVICES: [(&str, &str); 3] = [
    (
        "Proposta",
        "Análisamos cada caso individualmente e elaboramos a proposta que mais faça sentido para vocẽ",
    ),
    (
        "Homologação",
        "Cuidamos de todo o processo burócratico junto as fornecedoras de energia.",
    ),
    (
        "Acompanhamento",
        "Estaremos sempre próximos e a disposição para que o processo da sua instalação sejá o melhor possível",
    ),
];

/// One string per character. Spaces become non-breaking so that
/// inline-block letters keep their width.
pub fn letters(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c == ' ' { '\u{00A0}' } else { c })
        .map(String::from)
        .collect()
}

pub fn subtitle_words(text: &str) -> Vec<&str> {
    text.split(" | ").collect()
}

fn scroll_to_section(id: &str) {
    let section = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id));
    if let Some(section) = section {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

#[function_component(Hero)]
pub fn hero() -> Html {
    let onclick = Callback::from(|_: MouseEvent| scroll_to_section("solucoes"));
    let bracketed = format!("[{}]", SUBTITLE);

    html! {
        <section id="hero" class="hero-section">
            <div class="hero-content">
                <h1 class="hero-title">
                    { for letters(TITLE).into_iter().map(|letter| html! {
                        <span class="title-letter">{letter}</span>
                    }) }
                </h1>

                <p class="hero-subtitle">
                    // Mobile: one word per line
                    <span class="subtitle-mobile">
                        { for subtitle_words(SUBTITLE).into_iter().map(|word| html! {
                            <span class="subtitle-word">{word}</span>
                        }) }
                    </span>
                    <span class="subtitle-desktop">
                        { for letters(&bracketed).into_iter().map(|letter| html! {
                            <span class="subtitle-letter">{letter}</span>
                        }) }
                    </span>
                </p>

                <button class="hero-button" onclick={onclick}>{"Conheça Mais"}</button>
            </div>

            <div class="hero-media">
                <img
                    class="hero-image"
                    src="/solar-panel.jpg"
                    alt="Instalação painel solar"
                    style="filter: blur(3px);"
                />
                <div class="hero-overlay"></div>
            </div>
        </section>
    }
}

#[function_component(Solutions)]
pub fn solutions() -> Html {
    html! {
        <section id="solucoes" class="solutions-section">
            <div class="section-container solutions-container">
                <h2 class="section-title">{"Soluções Completas"}</h2>
                <p class="solutions-lead">
                    {"Da concepção à homologação,"}<br />
                    {"oferecemos um serviço completo"}<br />
                    {"para seu projeto de energia solar"}
                </p>

                <div class="solutions-media">
                    <img
                        src="/solar-panels-nature.jpg"
                        alt="Futuro que queremos com energia solar"
                    />
                </div>

                <div class="services-grid">
                    { for SERVICES.iter().map(|(title, body)| html! {
                        <div class="service-card">
                            <h3>{*title}</h3>
                            <p>{*body}</p>
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Contact)]
pub fn contact() -> Html {
    html! {
        <section id="contato" class="contact-section">
            <div class="contact-panel">
                <div class="section-container contact-container">
                    <h2 class="section-title contact-title">{"Vamos Conversar"}</h2>

                    <WhatsappLink message={config::CONTACT_MESSAGE}>
                        <div class="contact-button">{"Nos contate"}</div>
                    </WhatsappLink>

                    <img
                        class="contact-logo"
                        src="/solaire-inovacoes-logomarca.png"
                        alt="Logomarca solaire"
                        width="400"
                        height="400"
                    />
                </div>
            </div>
        </section>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let scope = use_node_ref();

    {
        let scope = scope.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                let animation = match scope.cast::<Element>().map(HeroAnimation::mount) {
                    Some(Ok(animation)) => Some(animation),
                    Some(Err(e)) => {
                        error!("Hero animation disabled: {}", e);
                        None
                    }
                    None => {
                        info!("Home scope not attached, skipping hero animation");
                        None
                    }
                };

                move || {
                    if let Some(animation) = animation {
                        info!("Leaving home, hero animation was {:?}", animation.phase());
                        animation.dispose();
                    }
                }
            },
            (), // Mount once; unmount tears the animation down
        );
    }

    html! {
        <main class="landing" ref={scope}>
            <style>
                {r#"
                    .landing {
                        position: relative;
                        width: 100%;
                        min-height: 100vh;
                        overflow: hidden;
                    }

                    .hero-section {
                        position: fixed;
                        inset: 0;
                        height: 100vh;
                    }

                    .hero-content {
                        position: absolute;
                        top: 20%;
                        width: 100%;
                        margin: 0 auto;
                        z-index: 10;
                        display: flex;
                        flex-direction: column;
                        gap: 1rem;
                        text-align: center;
                        color: #fff;
                    }

                    .hero-title {
                        margin: 0;
                        font-family: "Galano Grotesque", "Montserrat", sans-serif;
                        font-size: 3.75rem;
                        line-height: 1;
                        letter-spacing: 0.1em;
                        font-weight: 400;
                    }

                    .title-letter,
                    .subtitle-letter {
                        display: inline-block;
                    }

                    .hero-subtitle {
                        margin: 0;
                        font-family: "Brandon Grotesque", "Montserrat", sans-serif;
                        font-size: 1.25rem;
                        line-height: 1.75rem;
                        letter-spacing: 0.1em;
                    }

                    .subtitle-word {
                        display: block;
                    }

                    .subtitle-desktop {
                        display: none;
                    }

                    .hero-button {
                        width: fit-content;
                        margin: 1rem auto 0;
                        padding: 1rem 3rem;
                        background: transparent;
                        color: #fff;
                        font-size: 1.25rem;
                        font-weight: 500;
                        border: 1px solid #fff;
                        border-radius: 0.75rem;
                        cursor: pointer;
                        transition: all 0.3s ease-in-out;
                    }

                    .hero-button:hover {
                        background: #000;
                        border-color: #000;
                    }

                    .hero-media {
                        position: relative;
                        width: 100%;
                        height: 100%;
                    }

                    .hero-image {
                        position: absolute;
                        inset: 0;
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }

                    .hero-overlay {
                        position: absolute;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.4);
                    }

                    .section-container {
                        max-width: 1280px;
                        margin: 0 auto;
                        padding-left: 1.5rem;
                        padding-right: 1.5rem;
                    }

                    .section-title {
                        margin: 0;
                        text-align: center;
                        font-family: "Galano Grotesque", "Montserrat", sans-serif;
                        font-size: 3.75rem;
                        line-height: 1;
                        font-weight: 400;
                        letter-spacing: 0.025em;
                    }

                    .solutions-section {
                        position: relative;
                        width: 100%;
                        min-height: 100vh;
                        margin-top: 100vh;
                        background: #fff;
                        border-radius: 1.5rem 1.5rem 0 0;
                    }

                    .solutions-container {
                        display: flex;
                        flex-direction: column;
                        gap: 4rem;
                        padding-top: 9rem;
                        padding-bottom: 9rem;
                    }

                    .solutions-lead {
                        margin: 0;
                        text-align: center;
                        font-family: "Brandon Grotesque", "Montserrat", sans-serif;
                        font-size: 1.5rem;
                        letter-spacing: 0.05em;
                    }

                    .solutions-media {
                        position: relative;
                        width: 100%;
                        aspect-ratio: 1 / 1;
                        overflow: hidden;
                        background: #cbd5e1;
                        border-radius: 1.5rem;
                        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);
                    }

                    .solutions-media img {
                        position: absolute;
                        inset: 0;
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        object-position: bottom;
                    }

                    .services-grid {
                        display: grid;
                        grid-template-columns: 1fr;
                        gap: 2rem;
                        padding-top: 2rem;
                    }

                    .service-card {
                        padding: 1rem 0;
                    }

                    .service-card h3 {
                        margin: 0 0 0.5rem;
                        font-family: "Galano Grotesque", "Montserrat", sans-serif;
                        font-size: 2.25rem;
                        font-weight: 400;
                        letter-spacing: 0.025em;
                    }

                    .service-card p {
                        margin: 0;
                        font-family: "Brandon Grotesque", "Montserrat", sans-serif;
                        font-size: 1.25rem;
                        letter-spacing: 0.1em;
                        color: #475569;
                    }

                    .contact-section {
                        position: relative;
                        width: 100%;
                        background: #fff;
                    }

                    .contact-panel {
                        width: 100%;
                        background: #171717;
                        border-radius: 1.5rem 1.5rem 0 0;
                    }

                    .contact-container {
                        padding-top: 9rem;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        gap: 2rem;
                    }

                    .contact-title {
                        color: #fff;
                    }

                    .whatsapp-link {
                        text-decoration: none;
                    }

                    .contact-button {
                        padding: 0 1rem;
                        color: #fff;
                        border: 1px solid #fff;
                        border-radius: 0.25rem;
                    }

                    .contact-logo {
                        max-width: 100%;
                        height: auto;
                    }

                    @media (min-width: 640px) {
                        .hero-title,
                        .section-title {
                            font-size: 4.5rem;
                            letter-spacing: 0.1em;
                        }

                        .solutions-lead {
                            font-size: 2.25rem;
                        }

                        .solutions-media {
                            aspect-ratio: 16 / 9;
                        }

                        .service-card h3 {
                            letter-spacing: 0.1em;
                        }
                    }

                    @media (min-width: 768px) {
                        .subtitle-mobile {
                            display: none;
                        }

                        .subtitle-desktop {
                            display: inline;
                        }
                    }

                    @media (min-width: 1024px) {
                        .service-card h3 {
                            font-size: 3rem;
                        }
                    }

                    @media (min-width: 1280px) {
                        .services-grid {
                            grid-template-columns: repeat(3, 1fr);
                        }

                        .service-card + .service-card {
                            border-left: 1px solid #cbd5e1;
                            padding-left: 2rem;
                        }
                    }
                "#}
            </style>

            <Hero />
            <Solutions />
            <Contact />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_keep_spaces_visible() {
        assert_eq!(letters("A B"), vec!["A", "\u{00A0}", "B"]);
    }

    #[test]
    fn letters_split_on_characters_not_bytes() {
        let split = letters("AÇÃO");
        assert_eq!(split, vec!["A", "Ç", "Ã", "O"]);
        assert_eq!(letters(TITLE).len(), 7);
    }

    #[test]
    fn subtitle_has_one_word_per_service() {
        assert_eq!(
            subtitle_words(SUBTITLE),
            vec!["MICROGERAÇÃO", "MINIGERAÇÃO", "HOMOLOGAÇÃO"]
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn hero_renders_one_span_per_letter() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let app = yew::Renderer::<Hero>::with_root(root.clone()).render();
        TimeoutFuture::new(10).await;

        let count = |selector: &str| root.query_selector_all(selector).unwrap().length() as usize;
        assert_eq!(count(".hero-section"), 1);
        assert_eq!(count(".title-letter"), TITLE.chars().count());
        assert_eq!(count(".subtitle-letter"), SUBTITLE.chars().count() + 2);
        assert_eq!(count(".subtitle-word"), 3);
        assert_eq!(count(".hero-image"), 1);

        app.destroy();
        root.remove();
    }
}
