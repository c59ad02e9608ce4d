use serde::{Deserialize, Serialize};

use crate::language::Language;

/// The eight word classes the quiz asks about.
///
/// Every analyzer tag is mapped into this set (or skipped), so scoring and
/// display always work over the same closed enumeration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum Category {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
}

/// Reference material shown next to a category on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub description: &'static str,
    pub examples: &'static str,
    pub sentence: &'static str,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Noun,
        Category::Pronoun,
        Category::Verb,
        Category::Adjective,
        Category::Adverb,
        Category::Preposition,
        Category::Conjunction,
        Category::Interjection,
    ];

    /// Bucket for analyzer tags that have no mapping entry
    pub const DEFAULT: Category = Category::Noun;

    pub fn code(self) -> &'static str {
        match self {
            Category::Noun => "NOUN",
            Category::Pronoun => "PRON",
            Category::Verb => "VERB",
            Category::Adjective => "ADJ",
            Category::Adverb => "ADV",
            Category::Preposition => "ADP",
            Category::Conjunction => "CONJ",
            Category::Interjection => "INTJ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.code().eq_ignore_ascii_case(code))
    }

    /// Position in [`Category::ALL`], which is also the number key minus one
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn thai_name(self) -> &'static str {
        match self {
            Category::Noun => "คำนาม",
            Category::Pronoun => "คำสรรพนาม",
            Category::Verb => "คำกริยา",
            Category::Adjective => "คำคุณศัพท์",
            Category::Adverb => "คำกริยาวิเศษณ์",
            Category::Preposition => "คำบุพบท",
            Category::Conjunction => "คำสันธาน",
            Category::Interjection => "คำอุทาน",
        }
    }

    /// Bilingual label, leading with the language being practised
    pub fn label(self, language: Language) -> String {
        match language {
            Language::English => format!("{} ({})", self, self.thai_name()),
            Language::Thai => format!("{} ({})", self.thai_name(), self),
        }
    }

    pub fn reference(self, language: Language) -> Reference {
        match (language, self) {
            (Language::English, Category::Noun) => Reference {
                description: "names a person, place, thing or idea / คำที่ใช้เรียกคน สัตว์ สิ่งของ หรือความคิด",
                examples: "cat (แมว), city (เมือง), happiness (ความสุข)",
                sentence: "The cat sleeps on the sofa.",
            },
            (Language::English, Category::Pronoun) => Reference {
                description: "stands in for a noun / คำที่ใช้แทนคำนาม",
                examples: "I (ฉัน), you (คุณ), she (เธอ), they (พวกเขา)",
                sentence: "She gave it to them.",
            },
            (Language::English, Category::Verb) => Reference {
                description: "shows an action or a state / คำที่แสดงการกระทำหรือสภาพ",
                examples: "run (วิ่ง), eat (กิน), is (เป็น), can (สามารถ)",
                sentence: "He runs every morning.",
            },
            (Language::English, Category::Adjective) => Reference {
                description: "describes a noun / คำที่ขยายคำนาม",
                examples: "happy (มีความสุข), green (สีเขียว), beautiful (สวย)",
                sentence: "The happy child played.",
            },
            (Language::English, Category::Adverb) => Reference {
                description: "modifies a verb, adjective or adverb / คำที่ขยายคำกริยา คำคุณศัพท์ หรือคำวิเศษณ์",
                examples: "quickly (อย่างรวดเร็ว), very (มาก), today (วันนี้)",
                sentence: "She speaks very softly.",
            },
            (Language::English, Category::Preposition) => Reference {
                description: "links a noun to the rest of the sentence / คำที่แสดงความสัมพันธ์ระหว่างคำนามกับส่วนอื่น",
                examples: "in (ใน), on (บน), at (ที่), with (กับ)",
                sentence: "The book is on the table.",
            },
            (Language::English, Category::Conjunction) => Reference {
                description: "joins words, phrases or clauses / คำที่เชื่อมคำ วลี หรือประโยค",
                examples: "and (และ), but (แต่), or (หรือ), because (เพราะ)",
                sentence: "I like tea and coffee.",
            },
            (Language::English, Category::Interjection) => Reference {
                description: "expresses a sudden feeling / คำที่แสดงอารมณ์ความรู้สึกอย่างฉับพลัน",
                examples: "wow (ว้าว), oh (โอ้), ouch (โอ๊ย)",
                sentence: "Wow, that is amazing!",
            },
            (Language::Thai, Category::Noun) => Reference {
                description: "คำที่ใช้เรียกคน สัตว์ สิ่งของ สถานที่ หรือความคิด / names a person, place or thing",
                examples: "แมว (cat), เมือง (city), ความสุข (happiness)",
                sentence: "แมวนอนอยู่บนโซฟา",
            },
            (Language::Thai, Category::Pronoun) => Reference {
                description: "คำที่ใช้แทนคำนาม / stands in for a noun",
                examples: "ฉัน (I), คุณ (you), เขา (he/she), ที่ (that)",
                sentence: "เธอให้หนังสือแก่ฉัน",
            },
            (Language::Thai, Category::Verb) => Reference {
                description: "คำที่แสดงการกระทำหรือสภาพ รวมถึงคำช่วยกริยา / action, state or auxiliary",
                examples: "วิ่ง (run), กิน (eat), จะ (will), ได้ (can)",
                sentence: "เขาวิ่งทุกเช้า",
            },
            (Language::Thai, Category::Adjective) => Reference {
                description: "คำที่ขยายคำนามเพื่อบอกลักษณะ / describes a noun",
                examples: "สวย (beautiful), ใหญ่ (big), อร่อย (delicious)",
                sentence: "บ้านหลังใหญ่มีสวนสวย",
            },
            (Language::Thai, Category::Adverb) => Reference {
                description: "คำที่ขยายคำกริยาหรือคำวิเศษณ์อื่น / modifies a verb",
                examples: "มาก (very), เร็ว (fast), ไม่ (not)",
                sentence: "เธอฉลาดมาก",
            },
            (Language::Thai, Category::Preposition) => Reference {
                description: "คำที่แสดงความสัมพันธ์ระหว่างคำนามกับคำอื่น / links a noun to the sentence",
                examples: "ใน (in), บน (on), ของ (of), สำหรับ (for)",
                sentence: "แมวอยู่บนโต๊ะ",
            },
            (Language::Thai, Category::Conjunction) => Reference {
                description: "คำที่เชื่อมคำหรือประโยคเข้าด้วยกัน / joins words or clauses",
                examples: "และ (and), แต่ (but), หรือ (or), เพราะ (because)",
                sentence: "ฉันชอบชาและกาแฟ",
            },
            (Language::Thai, Category::Interjection) => Reference {
                description: "คำที่แสดงอารมณ์หรือความรู้สึก / expresses a feeling",
                examples: "ว้าว (wow), โอ้ (oh), โอ๊ย (ouch)",
                sentence: "ว้าว สวยจังเลย",
            },
        }
    }
}
