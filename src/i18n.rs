//! Localized text for the consent and disclaimer dialogs.
//!
//! Lookup is keyed by the first two letters of the configured language
//! tag; anything unknown falls back to English. Only the dialog text is
//! translated; the rest of the UI is terse enough to stay English.

use wisp_suggest::language_code;

/// The translatable strings of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    /// Shown when the user turns the fetch proxy on.
    pub proxy_disclaimer: &'static str,
    /// Shown before the first suggestion fetch is allowed.
    pub network_consent: &'static str,
    /// Confirm-dialog accept label.
    pub agree: &'static str,
    /// Confirm-dialog decline label.
    pub cancel: &'static str,
}

const EN: Strings = Strings {
    proxy_disclaimer: "Routing suggestions through a proxy sends every keystroke to the \
        proxy operator. Only continue with a proxy you trust.",
    network_consent: "Live suggestions send what you type to the selected search engine \
        while you type. Allow network requests for suggestions?",
    agree: "Agree",
    cancel: "Cancel",
};

const DE: Strings = Strings {
    proxy_disclaimer: "Laufen Vorschläge über einen Proxy, erhält dessen Betreiber jeden \
        Tastendruck. Fahren Sie nur mit einem Proxy fort, dem Sie vertrauen.",
    network_consent: "Live-Vorschläge senden Ihre Eingabe während des Tippens an die \
        gewählte Suchmaschine. Netzwerkzugriffe für Vorschläge erlauben?",
    agree: "Zustimmen",
    cancel: "Abbrechen",
};

const ES: Strings = Strings {
    proxy_disclaimer: "Si las sugerencias pasan por un proxy, su operador recibe cada \
        pulsación. Continúe solo con un proxy de confianza.",
    network_consent: "Las sugerencias en vivo envían lo que escribe al buscador \
        seleccionado mientras teclea. ¿Permitir las peticiones de red para sugerencias?",
    agree: "Aceptar",
    cancel: "Cancelar",
};

const FR: Strings = Strings {
    proxy_disclaimer: "Si les suggestions passent par un proxy, son opérateur reçoit \
        chaque frappe. Ne continuez qu'avec un proxy de confiance.",
    network_consent: "Les suggestions en direct envoient votre saisie au moteur \
        sélectionné pendant la frappe. Autoriser les requêtes réseau pour les suggestions ?",
    agree: "Accepter",
    cancel: "Annuler",
};

const IT: Strings = Strings {
    proxy_disclaimer: "Se i suggerimenti passano da un proxy, il suo gestore riceve ogni \
        digitazione. Continua solo con un proxy di cui ti fidi.",
    network_consent: "I suggerimenti in tempo reale inviano ciò che digiti al motore \
        selezionato mentre scrivi. Consentire le richieste di rete per i suggerimenti?",
    agree: "Accetta",
    cancel: "Annulla",
};

const PT: Strings = Strings {
    proxy_disclaimer: "Se as sugestões passarem por um proxy, o operador do proxy recebe \
        cada tecla digitada. Continue apenas com um proxy de confiança.",
    network_consent: "As sugestões ao vivo enviam o que você digita ao mecanismo \
        selecionado enquanto escreve. Permitir solicitações de rede para sugestões?",
    agree: "Aceitar",
    cancel: "Cancelar",
};

const RU: Strings = Strings {
    proxy_disclaimer: "Если подсказки идут через прокси, его оператор видит каждое \
        нажатие клавиши. Продолжайте только с прокси, которому доверяете.",
    network_consent: "Живые подсказки отправляют вводимый текст выбранной поисковой \
        системе во время набора. Разрешить сетевые запросы для подсказок?",
    agree: "Согласен",
    cancel: "Отмена",
};

const HI: Strings = Strings {
    proxy_disclaimer: "प्रॉक्सी के ज़रिये सुझाव भेजने पर हर कीस्ट्रोक प्रॉक्सी संचालक तक पहुँचता है। \
        केवल भरोसेमंद प्रॉक्सी के साथ जारी रखें।",
    network_consent: "लाइव सुझाव टाइप करते समय आपका टेक्स्ट चुने गए सर्च इंजन को भेजते हैं। \
        सुझावों के लिए नेटवर्क अनुरोधों की अनुमति दें?",
    agree: "सहमत",
    cancel: "रद्द करें",
};

const ZH: Strings = Strings {
    proxy_disclaimer: "通过代理获取建议时，代理运营者能看到您输入的每个字符。请仅在信任该代理时继续。",
    network_consent: "实时建议会在您输入时将内容发送给所选搜索引擎。允许为建议发起网络请求吗？",
    agree: "同意",
    cancel: "取消",
};

const JA: Strings = Strings {
    proxy_disclaimer: "プロキシ経由で候補を取得すると、入力内容がプロキシ運営者に送信されます。\
        信頼できるプロキシの場合のみ続行してください。",
    network_consent: "ライブ候補は入力中のテキストを選択した検索エンジンに送信します。\
        候補のためのネットワーク要求を許可しますか？",
    agree: "同意する",
    cancel: "キャンセル",
};

/// Returns the dialog strings for a language tag.
///
/// Tags are reduced to their first two letters ("de-DE" → "de");
/// unknown codes fall back to English.
#[must_use]
pub fn strings(language: &str) -> &'static Strings {
    match language_code(language).as_str() {
        "de" => &DE,
        "es" => &ES,
        "fr" => &FR,
        "it" => &IT,
        "pt" => &PT,
        "ru" => &RU,
        "hi" => &HI,
        "zh" => &ZH,
        "ja" => &JA,
        _ => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(strings("tlh"), &EN);
        assert_eq!(strings(""), &EN);
    }

    #[test]
    fn region_tags_reduce_to_language() {
        assert_eq!(strings("de-DE"), &DE);
        assert_eq!(strings("pt-BR"), &PT);
        assert_eq!(strings("ES"), &ES);
    }

    #[test]
    fn every_language_has_nonempty_strings() {
        for lang in ["en", "de", "es", "fr", "it", "pt", "ru", "hi", "zh", "ja"] {
            let s = strings(lang);
            assert!(!s.proxy_disclaimer.is_empty(), "{lang} proxy_disclaimer");
            assert!(!s.network_consent.is_empty(), "{lang} network_consent");
            assert!(!s.agree.is_empty(), "{lang} agree");
            assert!(!s.cancel.is_empty(), "{lang} cancel");
        }
    }
}
