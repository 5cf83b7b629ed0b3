use yew::prelude::*;

use crate::config;

/// `wa.me` deep link that opens a chat with `number` and `message` typed
/// in. Everything but digits is stripped from the number.
pub fn whatsapp_url(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if message.is_empty() {
        format!("https://wa.me/{}", digits)
    } else {
        format!("https://wa.me/{}?text={}", digits, urlencoding::encode(message))
    }
}

#[derive(Properties, PartialEq)]
pub struct WhatsappLinkProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(WhatsappLink)]
pub fn whatsapp_link(props: &WhatsappLinkProps) -> Html {
    let href = whatsapp_url(config::WHATSAPP_NUMBER, &props.message);

    html! {
        <a
            href={href}
            class={classes!("whatsapp-link", props.class.clone())}
            target="_blank"
            rel="noopener noreferrer"
        >
            { for props.children.iter() }
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_message_and_strips_number() {
        assert_eq!(
            whatsapp_url("+55 (11) 91234-5678", "Olá, quero saber mais"),
            "https://wa.me/5511912345678?text=Ol%C3%A1%2C%20quero%20saber%20mais"
        );
    }

    #[test]
    fn empty_message_has_no_text_param() {
        assert_eq!(whatsapp_url("5511912345678", ""), "https://wa.me/5511912345678");
    }

    #[test]
    fn configured_number_is_a_full_brazilian_line() {
        let url = whatsapp_url(crate::config::WHATSAPP_NUMBER, crate::config::CONTACT_MESSAGE);
        let digits = url
            .strip_prefix("https://wa.me/")
            .and_then(|rest| rest.split('?').next())
            .unwrap();
        // Country code, two-digit area code, nine-digit mobile number.
        assert!(digits.starts_with("55"), "{digits}");
        assert_eq!(digits.len(), 13, "{digits}");
        assert!(url.contains("?text="));
    }
}
