//! Static surah table for the Madani mushaf layout
//!
//! Start pages follow the standard 604-page print. Page counts run up to the
//! page where the next surah starts, so every page from 2 to 604 is covered.

use crate::types::Surah;

/// Number of surahs in the table
pub const SURAH_COUNT: usize = 114;

const fn surah(
    id: u16,
    name_ar: &'static str,
    name_en: &'static str,
    start_page: u16,
    pages: u16,
) -> Surah {
    Surah {
        id,
        name_ar,
        name_en,
        start_page,
        pages,
    }
}

pub static SURAHS: [Surah; SURAH_COUNT] = [
    surah(1, "الفاتحة", "Al-Fatihah", 2, 1),
    surah(2, "البقرة", "Al-Baqarah", 2, 48),
    surah(3, "آل عمران", "Ali 'Imran", 50, 27),
    surah(4, "النساء", "An-Nisa", 77, 29),
    surah(5, "المائدة", "Al-Ma'idah", 106, 22),
    surah(6, "الأنعام", "Al-An'am", 128, 23),
    surah(7, "الأعراف", "Al-A'raf", 151, 26),
    surah(8, "الأنفال", "Al-Anfal", 177, 10),
    surah(9, "التوبة", "At-Tawbah", 187, 21),
    surah(10, "يونس", "Yunus", 208, 13),
    surah(11, "هود", "Hud", 221, 14),
    surah(12, "يوسف", "Yusuf", 235, 14),
    surah(13, "الرعد", "Ar-Ra'd", 249, 6),
    surah(14, "إبراهيم", "Ibrahim", 255, 7),
    surah(15, "الحجر", "Al-Hijr", 262, 5),
    surah(16, "النحل", "An-Nahl", 267, 15),
    surah(17, "الإسراء", "Al-Isra", 282, 11),
    surah(18, "الكهف", "Al-Kahf", 293, 12),
    surah(19, "مريم", "Maryam", 305, 7),
    surah(20, "طه", "Ta-Ha", 312, 10),
    surah(21, "الأنبياء", "Al-Anbiya", 322, 10),
    surah(22, "الحج", "Al-Hajj", 332, 10),
    surah(23, "المؤمنون", "Al-Mu'minun", 342, 8),
    surah(24, "النور", "An-Nur", 350, 9),
    surah(25, "الفرقان", "Al-Furqan", 359, 8),
    surah(26, "الشعراء", "Ash-Shu'ara", 367, 10),
    surah(27, "النمل", "An-Naml", 377, 8),
    surah(28, "القصص", "Al-Qasas", 385, 11),
    surah(29, "العنكبوت", "Al-'Ankabut", 396, 8),
    surah(30, "الروم", "Ar-Rum", 404, 7),
    surah(31, "لقمان", "Luqman", 411, 4),
    surah(32, "السجدة", "As-Sajdah", 415, 3),
    surah(33, "الأحزاب", "Al-Ahzab", 418, 10),
    surah(34, "سبأ", "Saba", 428, 6),
    surah(35, "فاطر", "Fatir", 434, 6),
    surah(36, "يس", "Ya-Sin", 440, 6),
    surah(37, "الصافات", "As-Saffat", 446, 7),
    surah(38, "ص", "Sad", 453, 5),
    surah(39, "الزمر", "Az-Zumar", 458, 9),
    surah(40, "غافر", "Ghafir", 467, 10),
    surah(41, "فصلت", "Fussilat", 477, 6),
    surah(42, "الشورى", "Ash-Shura", 483, 6),
    surah(43, "الزخرف", "Az-Zukhruf", 489, 7),
    surah(44, "الدخان", "Ad-Dukhan", 496, 3),
    surah(45, "الجاثية", "Al-Jathiyah", 499, 3),
    surah(46, "الأحقاف", "Al-Ahqaf", 502, 5),
    surah(47, "محمد", "Muhammad", 507, 4),
    surah(48, "الفتح", "Al-Fath", 511, 4),
    surah(49, "الحجرات", "Al-Hujurat", 515, 3),
    surah(50, "ق", "Qaf", 518, 2),
    surah(51, "الذاريات", "Adh-Dhariyat", 520, 3),
    surah(52, "الطور", "At-Tur", 523, 3),
    surah(53, "النجم", "An-Najm", 526, 2),
    surah(54, "القمر", "Al-Qamar", 528, 3),
    surah(55, "الرحمن", "Ar-Rahman", 531, 3),
    surah(56, "الواقعة", "Al-Waqi'ah", 534, 3),
    surah(57, "الحديد", "Al-Hadid", 537, 5),
    surah(58, "المجادلة", "Al-Mujadilah", 542, 3),
    surah(59, "الحشر", "Al-Hashr", 545, 4),
    surah(60, "الممتحنة", "Al-Mumtahanah", 549, 2),
    surah(61, "الصف", "As-Saff", 551, 2),
    surah(62, "الجمعة", "Al-Jumu'ah", 553, 1),
    surah(63, "المنافقون", "Al-Munafiqun", 554, 2),
    surah(64, "التغابن", "At-Taghabun", 556, 2),
    surah(65, "الطلاق", "At-Talaq", 558, 2),
    surah(66, "التحريم", "At-Tahrim", 560, 2),
    surah(67, "الملك", "Al-Mulk", 562, 2),
    surah(68, "القلم", "Al-Qalam", 564, 2),
    surah(69, "الحاقة", "Al-Haqqah", 566, 2),
    surah(70, "المعارج", "Al-Ma'arij", 568, 2),
    surah(71, "نوح", "Nuh", 570, 2),
    surah(72, "الجن", "Al-Jinn", 572, 2),
    surah(73, "المزمل", "Al-Muzzammil", 574, 1),
    surah(74, "المدثر", "Al-Muddaththir", 575, 2),
    surah(75, "القيامة", "Al-Qiyamah", 577, 1),
    surah(76, "الإنسان", "Al-Insan", 578, 2),
    surah(77, "المرسلات", "Al-Mursalat", 580, 2),
    surah(78, "النبأ", "An-Naba", 582, 1),
    surah(79, "النازعات", "An-Nazi'at", 583, 2),
    surah(80, "عبس", "'Abasa", 585, 1),
    surah(81, "التكوير", "At-Takwir", 586, 1),
    surah(82, "الانفطار", "Al-Infitar", 587, 1),
    surah(83, "المطففين", "Al-Mutaffifin", 587, 2),
    surah(84, "الانشقاق", "Al-Inshiqaq", 589, 1),
    surah(85, "البروج", "Al-Buruj", 590, 1),
    surah(86, "الطارق", "At-Tariq", 591, 1),
    surah(87, "الأعلى", "Al-A'la", 591, 1),
    surah(88, "الغاشية", "Al-Ghashiyah", 592, 1),
    surah(89, "الفجر", "Al-Fajr", 593, 1),
    surah(90, "البلد", "Al-Balad", 594, 1),
    surah(91, "الشمس", "Ash-Shams", 595, 1),
    surah(92, "الليل", "Al-Layl", 595, 1),
    surah(93, "الضحى", "Ad-Duha", 596, 1),
    surah(94, "الشرح", "Ash-Sharh", 596, 1),
    surah(95, "التين", "At-Tin", 597, 1),
    surah(96, "العلق", "Al-'Alaq", 597, 1),
    surah(97, "القدر", "Al-Qadr", 598, 1),
    surah(98, "البينة", "Al-Bayyinah", 598, 1),
    surah(99, "الزلزلة", "Az-Zalzalah", 599, 1),
    surah(100, "العاديات", "Al-'Adiyat", 599, 1),
    surah(101, "القارعة", "Al-Qari'ah", 600, 1),
    surah(102, "التكاثر", "At-Takathur", 600, 1),
    surah(103, "العصر", "Al-'Asr", 601, 1),
    surah(104, "الهمزة", "Al-Humazah", 601, 1),
    surah(105, "الفيل", "Al-Fil", 601, 1),
    surah(106, "قريش", "Quraysh", 602, 1),
    surah(107, "الماعون", "Al-Ma'un", 602, 1),
    surah(108, "الكوثر", "Al-Kawthar", 602, 1),
    surah(109, "الكافرون", "Al-Kafirun", 603, 1),
    surah(110, "النصر", "An-Nasr", 603, 1),
    surah(111, "المسد", "Al-Masad", 603, 1),
    surah(112, "الإخلاص", "Al-Ikhlas", 604, 1),
    surah(113, "الفلق", "Al-Falaq", 604, 1),
    surah(114, "الناس", "An-Nas", 604, 1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FIRST_PAGE, LAST_PAGE};

    #[test]
    fn test_ids_are_sequential() {
        for (idx, surah) in SURAHS.iter().enumerate() {
            assert_eq!(surah.id as usize, idx + 1);
        }
    }

    #[test]
    fn test_start_pages_are_non_decreasing() {
        for pair in SURAHS.windows(2) {
            assert!(pair[0].start_page <= pair[1].start_page);
        }
    }

    #[test]
    fn test_ranges_stay_within_page_bounds() {
        for surah in SURAHS.iter() {
            assert!(surah.pages >= 1);
            assert!(surah.start_page >= FIRST_PAGE);
            assert!(surah.end_page() <= LAST_PAGE);
        }
    }

    #[test]
    fn test_known_start_pages() {
        assert_eq!(SURAHS[1].start_page, 2);
        assert_eq!(SURAHS[17].start_page, 293);
        assert_eq!(SURAHS[35].start_page, 440);
        assert_eq!(SURAHS[113].start_page, 604);
    }
}
