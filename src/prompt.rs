// src/prompt.rs
// Instruction payload for the reply generation endpoint

use serde::Serialize;

use crate::reply::ReplyRequest;

/// Behavioral rules sent with every request. Does not depend on input.
const SYSTEM_LINES: &[&str] = &[
    "Sen Türkçe, günlük ama saygılı bir flört asistanısın.",
    "Kısa, doğal ve kibar cevaplar üret.",
    "Cevaplar karşı tarafın tonunu yakalasın ve hedefe uygun olsun.",
    "Aşırı uzun yazma, gereksiz tanışma cümleleri ekleme.",
    "Emoji kullanımı kontrollü olsun.",
    "Karşı taraf soğuksa yumuşak aç, samimiyse samimi devam et.",
    "Gurur kırıcı mesajlarda sınırı net koy ama drama yapma.",
    "Cinsel taciz, zorlama, manipülasyon gibi istekleri reddet.",
    "Yaş küçüklüğü ima edilirse güvenli reddet ve konuşmayı bitir.",
    "Hakaret veya nefret varsa sakinleştirici cevap öner.",
    "En yüksek başarı ihtimali olan tek bir öneri ve 3 alternatif ver.",
];

const GOAL_PREFIX: &str = "Kısa hedef:";
const GOAL_UNSPECIFIED: &str = "belirtilmedi";
const CLOSING_LINE: &str = "Cevapları kısa tut ve farklı tonlarda alternatifler ver.";

/// System + user directive pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyPrompt {
    pub system: String,
    pub user: String,
}

/// Build the prompt for a request. Pure: same request, same prompt.
pub fn build_reply_prompt(request: &ReplyRequest) -> ReplyPrompt {
    let goal_line = match request.goal() {
        Some(goal) => format!("{GOAL_PREFIX} {goal}"),
        None => format!("{GOAL_PREFIX} {GOAL_UNSPECIFIED}"),
    };

    let user = [
        format!("Tarz: {}.", request.style()),
        goal_line,
        format!("Karşı tarafın mesajı: \"{}\".", request.message()),
        CLOSING_LINE.to_string(),
    ]
    .join(" ");

    ReplyPrompt {
        system: SYSTEM_LINES.join(" "),
        user,
    }
}
