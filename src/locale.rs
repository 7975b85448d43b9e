use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

/// User-facing text for one locale.
pub struct Strings {
    pub nav_wall: &'static str,
    pub nav_calendar: &'static str,
    pub nav_profile: &'static str,
    pub empty_title: &'static str,
    pub empty_hint: &'static str,
    pub composer_title: &'static str,
    pub composer_note_title: &'static str,
    pub composer_tasks: &'static str,
    pub composer_color: &'static str,
    pub profile_nickname: &'static str,
    pub profile_fullname: &'static str,
    pub profile_age: &'static str,
    pub profile_dob: &'static str,
    pub profile_saved: &'static str,
    pub profile_save_failed: &'static str,
    pub note_saving: &'static str,
    pub note_create_failed: &'static str,
    pub note_delete_failed: &'static str,
    pub task_toggle_failed: &'static str,
}

const EN: Strings = Strings {
    nav_wall: "Sticky Wall",
    nav_calendar: "Calendar",
    nav_profile: "Profile",
    empty_title: "No notes yet",
    empty_hint: "Select the '+' card to create your first note!",
    composer_title: " New Note ",
    composer_note_title: " Title ",
    composer_tasks: " Tasks (one per line) ",
    composer_color: " Color ",
    profile_nickname: " Nickname ",
    profile_fullname: " Full Name ",
    profile_age: " Age ",
    profile_dob: " Date of Birth (YYYY-MM-DD) ",
    profile_saved: "Profile saved!",
    profile_save_failed: "Failed to save profile.",
    note_saving: " Saving note… ",
    note_create_failed: "Failed to create note.",
    note_delete_failed: "Failed to delete note.",
    task_toggle_failed: "Failed to update task.",
};

const ID: Strings = Strings {
    nav_wall: "Sticky Wall",
    nav_calendar: "Kalender",
    nav_profile: "Profil",
    empty_title: "Belum ada catatan",
    empty_hint: "Klik tombol '+' untuk membuat catatan pertamamu!",
    composer_title: " Catatan Baru ",
    composer_note_title: " Judul ",
    composer_tasks: " Tugas (satu per baris) ",
    composer_color: " Warna ",
    profile_nickname: " Nama Panggilan ",
    profile_fullname: " Nama Lengkap ",
    profile_age: " Umur ",
    profile_dob: " Tanggal Lahir (YYYY-MM-DD) ",
    profile_saved: "Profil berhasil disimpan!",
    profile_save_failed: "Gagal menyimpan profil.",
    note_saving: " Menyimpan catatan… ",
    note_create_failed: "Gagal membuat catatan.",
    note_delete_failed: "Gagal menghapus catatan.",
    task_toggle_failed: "Gagal memperbarui tugas.",
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Id => &ID,
        }
    }

    /// Sunday first.
    pub fn weekday_labels(self) -> [&'static str; 7] {
        match self {
            Locale::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Locale::Id => ["Min", "Sen", "Sel", "Rab", "Kam", "Jum", "Sab"],
        }
    }

    /// `month` is 1-based.
    pub fn month_name(self, month: u32) -> &'static str {
        const EN_MONTHS: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        const ID_MONTHS: [&str; 12] = [
            "Januari",
            "Februari",
            "Maret",
            "April",
            "Mei",
            "Juni",
            "Juli",
            "Agustus",
            "September",
            "Oktober",
            "November",
            "Desember",
        ];
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::En => EN_MONTHS[index],
            Locale::Id => ID_MONTHS[index],
        }
    }
}
