use std::panic::{self, AssertUnwindSafe};

use derive_more::Display;
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use crate::{
    entities::{bundle::ResumeBundle, resume::Resume, skill::Skill},
    formatters::{format_date_range, format_month_year, format_phone, split_technologies, text_to_bullets},
    pdf::layout::{text_width_mm, wrap_text, FontWeight, PaperSize, PT_TO_MM},
};

const MARGIN_MM: f32 = 18.0;
const BULLET_INDENT_MM: f32 = 5.0;
const LAYER_NAME: &str = "Content";

const NAME_PT: f32 = 20.0;
const HEADLINE_PT: f32 = 12.0;
const SECTION_PT: f32 = 12.5;
const ENTRY_PT: f32 = 10.5;
const BODY_PT: f32 = 10.0;
const SMALL_PT: f32 = 9.0;

#[derive(Debug, Display)]
pub enum RenderError {
    #[display("font registration failed: {_0}")]
    Font(String),

    #[display("document serialization failed: {_0}")]
    Serialization(String),

    #[display("PDF backend panicked: {_0}")]
    Panicked(String),
}

impl std::error::Error for RenderError {}

/// Renderer-independent description of the document, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Name(String),
    Headline(String),
    Contact(String),
    SectionTitle(String),
    /// Bold title with a right-aligned date column.
    Entry { title: String, dates: String },
    Detail(String),
    Paragraph(String),
    Bullet(String),
    Gap,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub paper: PaperSize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
}

impl DocumentRenderer {
    pub fn new(options: RenderOptions) -> Self {
        DocumentRenderer { options }
    }

    /// Bundle in, PDF bytes out. Panics inside the PDF backend are reported as
    /// `RenderError::Panicked` rather than unwinding into the caller.
    pub fn render(&self, bundle: &ResumeBundle) -> Result<Vec<u8>, RenderError> {
        let blocks = compose(bundle);

        let title = document_title(&bundle.resume);
        let paper = self.options.paper;

        panic::catch_unwind(AssertUnwindSafe(|| paint(&title, &blocks, paper)))
            .unwrap_or_else(|payload| Err(RenderError::Panicked(panic_message(payload))))
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn document_title(resume: &Resume) -> String {
    resume
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(resume.title.trim())
        .to_string()
}

/// `"Senior_Engineer_42.pdf"`; `"resume_42.pdf"` when the title has nothing usable.
pub fn export_filename(resume: &Resume) -> String {
    derive_filename(resume, |c| c.is_ascii_alphanumeric())
}

/// Same convention as [`export_filename`] but keeping non-ASCII letters, for
/// the RFC 5987 `filename*` parameter.
pub fn export_filename_utf8(resume: &Resume) -> String {
    derive_filename(resume, char::is_alphanumeric)
}

fn derive_filename(resume: &Resume, keep: impl Fn(char) -> bool) -> String {
    let stem: String = resume
        .title
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            c if keep(c) || matches!(c, '-' | '_' | '.') => Some(c),
            _ => None,
        })
        .collect();

    let stem = if stem.trim_matches(['_', '.']).is_empty() { "resume" } else { stem.as_str() };
    format!("{}_{}.pdf", stem, resume.id)
}

// ───── Composition ─────────────────────────────────────────────────────

/// Header, then Summary, Experience, Education, Projects, Skills, Certifications
/// and Achievements. Empty sections are left out.
pub fn compose(bundle: &ResumeBundle) -> Vec<Block> {
    let mut blocks = Vec::new();
    compose_header(&bundle.resume, &mut blocks);

    let summary = text_to_bullets(bundle.resume.summary.as_deref());
    if !summary.is_empty() {
        blocks.push(Block::SectionTitle("Summary".into()));
        blocks.extend(summary.into_iter().map(Block::Paragraph));
        blocks.push(Block::Gap);
    }

    let sections = &bundle.sections;

    if !sections.experience.is_empty() {
        blocks.push(Block::SectionTitle("Experience".into()));
        for job in &sections.experience {
            let f = &job.fields;
            blocks.push(Block::Entry {
                title: f.position.clone(),
                dates: format_date_range(Some(f.start_date), f.displayed_end()),
            });
            blocks.push(Block::Detail(join_present(&[Some(&f.company), f.location.as_ref()])));
            blocks.extend(text_to_bullets(f.description.as_deref()).into_iter().map(Block::Bullet));
        }
        blocks.push(Block::Gap);
    }

    if !sections.education.is_empty() {
        blocks.push(Block::SectionTitle("Education".into()));
        for edu in &sections.education {
            let f = &edu.fields;
            let title = match &f.field_of_study {
                Some(field) => format!("{} in {}", f.degree, field),
                None => f.degree.clone(),
            };
            blocks.push(Block::Entry {
                title,
                dates: format_date_range(Some(f.start_date), f.end_date),
            });
            let gpa = f.gpa.map(|gpa| format!("GPA: {:.2}", gpa));
            blocks.push(Block::Detail(join_present(&[Some(&f.school), gpa.as_ref()])));
            blocks.extend(text_to_bullets(f.description.as_deref()).into_iter().map(Block::Bullet));
        }
        blocks.push(Block::Gap);
    }

    if !sections.projects.is_empty() {
        blocks.push(Block::SectionTitle("Projects".into()));
        for project in &sections.projects {
            let f = &project.fields;
            blocks.push(Block::Entry {
                title: f.name.clone(),
                dates: format_date_range(Some(f.start_date), f.end_date),
            });
            let technologies = split_technologies(&f.technologies);
            if !technologies.is_empty() {
                blocks.push(Block::Detail(format!("Technologies: {}", technologies.join(", "))));
            }
            blocks.extend(text_to_bullets(Some(&f.description)).into_iter().map(Block::Bullet));
            let links = join_present(&[f.project_url.as_ref(), f.github_url.as_ref()]);
            if !links.is_empty() {
                blocks.push(Block::Detail(links));
            }
        }
        blocks.push(Block::Gap);
    }

    if !sections.skills.is_empty() {
        blocks.push(Block::SectionTitle("Skills".into()));
        blocks.extend(skill_lines(&sections.skills).into_iter().map(Block::Paragraph));
        blocks.push(Block::Gap);
    }

    if !sections.certifications.is_empty() {
        blocks.push(Block::SectionTitle("Certifications".into()));
        for cert in &sections.certifications {
            let f = &cert.fields;
            let dates = match f.expiration_date {
                Some(expires) => format!("{} - {}", format_month_year(f.issue_date), format_month_year(expires)),
                None => format_month_year(f.issue_date),
            };
            blocks.push(Block::Entry { title: f.name.clone(), dates });
            let credential = f.credential_id.as_ref().map(|id| format!("Credential ID: {}", id));
            blocks.push(Block::Detail(join_present(&[
                Some(&f.issuing_organization),
                credential.as_ref(),
                f.credential_url.as_ref(),
            ])));
        }
        blocks.push(Block::Gap);
    }

    if !sections.achievements.is_empty() {
        blocks.push(Block::SectionTitle("Achievements".into()));
        for achievement in &sections.achievements {
            let f = &achievement.fields;
            blocks.push(Block::Entry {
                title: f.title.clone(),
                dates: format_month_year(f.date_achieved),
            });
            if let Some(org) = &f.organization {
                blocks.push(Block::Detail(org.clone()));
            }
            blocks.extend(text_to_bullets(Some(&f.description)).into_iter().map(Block::Bullet));
        }
        blocks.push(Block::Gap);
    }

    if blocks.last() == Some(&Block::Gap) {
        blocks.pop();
    }
    blocks
}

fn compose_header(resume: &Resume, blocks: &mut Vec<Block>) {
    blocks.push(Block::Name(document_title(resume)));

    if let Some(headline) = resume.professional_title.as_ref().filter(|t| !t.trim().is_empty()) {
        blocks.push(Block::Headline(headline.trim().to_string()));
    }

    let phone = resume.phone.as_deref().map(format_phone);
    let contact = join_present(&[resume.email.as_ref(), phone.as_ref(), resume.location.as_ref()]);
    if !contact.is_empty() {
        blocks.push(Block::Contact(contact));
    }

    let links = join_present(&[
        resume.website_url.as_ref(),
        resume.linkedin_url.as_ref(),
        resume.github_url.as_ref(),
        resume.twitter_url.as_ref(),
    ]);
    if !links.is_empty() {
        blocks.push(Block::Contact(links));
    }
    blocks.push(Block::Gap);
}

/// One line per category, in canonical skill order. Uncategorised skills come first.
fn skill_lines(skills: &[Skill]) -> Vec<String> {
    let mut lines: Vec<(String, Vec<String>)> = Vec::new();

    for skill in skills {
        let f = &skill.fields;
        let label = match f.years_of_experience {
            Some(years) => format!("{} ({}, {} yrs)", f.name, f.level.label(), years),
            None => format!("{} ({})", f.name, f.level.label()),
        };
        match lines.last_mut() {
            Some((category, names)) if *category == f.category => names.push(label),
            _ => lines.push((f.category.clone(), vec![label])),
        }
    }

    lines
        .into_iter()
        .map(|(category, names)| {
            if category.is_empty() {
                names.join(", ")
            } else {
                format!("{}: {}", category, names.join(", "))
            }
        })
        .collect()
}

fn join_present(parts: &[Option<&String>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

// ───── Painting ────────────────────────────────────────────────────────

fn paint(title: &str, blocks: &[Block], paper: PaperSize) -> Result<Vec<u8>, RenderError> {
    let mut painter = Painter::new(title, paper)?;

    for block in blocks {
        match block {
            Block::Name(text) => painter.paragraph(text, NAME_PT, FontWeight::Bold, 0.0),
            Block::Headline(text) => painter.paragraph(text, HEADLINE_PT, FontWeight::Regular, 0.0),
            Block::Contact(text) => painter.paragraph(text, SMALL_PT, FontWeight::Regular, 0.0),
            Block::SectionTitle(text) => {
                painter.reserve(line_height(SECTION_PT) + line_height(ENTRY_PT) * 2.0);
                painter.paragraph(&text.to_uppercase(), SECTION_PT, FontWeight::Bold, 0.0);
                painter.rule();
            }
            Block::Entry { title, dates } => painter.entry(title, dates),
            Block::Detail(text) => painter.paragraph(text, SMALL_PT, FontWeight::Regular, 0.0),
            Block::Paragraph(text) => painter.paragraph(text, BODY_PT, FontWeight::Regular, 0.0),
            Block::Bullet(text) => painter.bullet(text),
            Block::Gap => painter.gap(line_height(BODY_PT) * 0.6),
        }
    }

    painter.finish()
}

fn line_height(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.35
}

/// Maps text onto the WinAnsi repertoire of the builtin fonts, which the PDF
/// backend would otherwise drop silently. Latin letters lose their accent and
/// anything else becomes `?`. Also returns how many characters were replaced.
fn win_ansi_text(text: &str) -> (String, usize) {
    let mut replaced = 0;
    let mapped = text
        .chars()
        .filter_map(|c| match c {
            c if is_win_ansi(c) => Some(c),
            '\u{00A0}' => Some(' '),
            '\u{00AD}' => None,
            c if c.is_whitespace() => Some(' '),
            c => {
                replaced += 1;
                Some(fold_latin(c).unwrap_or('?'))
            }
        })
        .collect();
    (mapped, replaced)
}

fn is_win_ansi(c: char) -> bool {
    matches!(
        c,
        ' '..='~'
            | '\u{00A1}'..='\u{00AC}'
            | '\u{00AE}'..='\u{00FF}'
            | 'Œ' | 'œ' | 'Š' | 'š' | 'Ÿ' | 'Ž' | 'ž' | 'ƒ' | 'ˆ' | '˜'
            | '–' | '—' | '‘' | '’' | '‚' | '“' | '”' | '„'
            | '†' | '‡' | '•' | '…' | '‰' | '‹' | '›' | '€' | '™'
    )
}

/// Latin Extended-A letters without a WinAnsi code, reduced to their base letter.
fn fold_latin(c: char) -> Option<char> {
    let base = match c {
        'Ā' | 'Ă' | 'Ą' => 'A',
        'ā' | 'ă' | 'ą' => 'a',
        'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ď' | 'Đ' => 'D',
        'ď' | 'đ' => 'd',
        'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => 'G',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'Ĥ' | 'Ħ' => 'H',
        'ĥ' | 'ħ' => 'h',
        'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'Ĵ' => 'J',
        'ĵ' => 'j',
        'Ķ' => 'K',
        'ķ' => 'k',
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => 'L',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'Ń' | 'Ņ' | 'Ň' => 'N',
        'ń' | 'ņ' | 'ň' => 'n',
        'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ō' | 'ŏ' | 'ő' => 'o',
        'Ŕ' | 'Ŗ' | 'Ř' => 'R',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'Ś' | 'Ŝ' | 'Ş' | 'Ș' => 'S',
        'ś' | 'ŝ' | 'ş' | 'ș' => 's',
        'Ţ' | 'Ť' | 'Ŧ' | 'Ț' => 'T',
        'ţ' | 'ť' | 'ŧ' | 'ț' => 't',
        'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ŵ' => 'W',
        'ŵ' => 'w',
        'Ŷ' => 'Y',
        'ŷ' => 'y',
        'Ź' | 'Ż' => 'Z',
        'ź' | 'ż' => 'z',
        _ => return None,
    };
    Some(base)
}

struct Painter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f32,
    height: f32,
    cursor: f32,
    replaced: usize,
}

impl Painter {
    fn new(title: &str, paper: PaperSize) -> Result<Self, RenderError> {
        let (width, height) = paper.dimensions_mm();
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), LAYER_NAME);

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Font(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);

        Ok(Painter { doc, layer, regular, bold, width, height, cursor: height - MARGIN_MM, replaced: 0 })
    }

    fn content_width(&self) -> f32 {
        self.width - 2.0 * MARGIN_MM
    }

    /// Starts a new page unless `needed` millimetres remain above the bottom margin.
    fn reserve(&mut self, needed: f32) {
        if self.cursor - needed < MARGIN_MM {
            let (page, layer) = self.doc.add_page(Mm(self.width), Mm(self.height), LAYER_NAME);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = self.height - MARGIN_MM;
        }
    }

    /// Advances one line and returns its baseline.
    fn next_line(&mut self, size_pt: f32) -> f32 {
        let advance = line_height(size_pt);
        self.reserve(advance);
        self.cursor -= advance;
        self.cursor
    }

    fn text_at(&mut self, text: &str, size_pt: f32, weight: FontWeight, x: f32, y: f32) {
        let (text, replaced) = win_ansi_text(text);
        self.replaced += replaced;

        let font = match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        };
        self.layer.use_text(text, size_pt, Mm(x), Mm(y), font);
    }

    fn paragraph(&mut self, text: &str, size_pt: f32, weight: FontWeight, indent: f32) {
        for line in wrap_text(text, self.content_width() - indent, size_pt, weight) {
            let y = self.next_line(size_pt);
            self.text_at(&line, size_pt, weight, MARGIN_MM + indent, y);
        }
    }

    fn bullet(&mut self, text: &str) {
        let lines = wrap_text(text, self.content_width() - BULLET_INDENT_MM, BODY_PT, FontWeight::Regular);
        for (i, line) in lines.iter().enumerate() {
            let y = self.next_line(BODY_PT);
            if i == 0 {
                self.text_at("-", BODY_PT, FontWeight::Regular, MARGIN_MM + 1.5, y);
            }
            self.text_at(line, BODY_PT, FontWeight::Regular, MARGIN_MM + BULLET_INDENT_MM, y);
        }
    }

    fn entry(&mut self, title: &str, dates: &str) {
        let dates_width = text_width_mm(dates, BODY_PT, FontWeight::Regular);
        let title_width = (self.content_width() - dates_width - 4.0).max(self.content_width() / 2.0);
        let lines = wrap_text(title, title_width, ENTRY_PT, FontWeight::Bold);

        self.reserve(line_height(ENTRY_PT) * 2.0);
        let y = self.next_line(ENTRY_PT);
        if let Some(first) = lines.first() {
            self.text_at(first, ENTRY_PT, FontWeight::Bold, MARGIN_MM, y);
        }
        if !dates.is_empty() {
            let x = self.width - MARGIN_MM - dates_width;
            self.text_at(dates, BODY_PT, FontWeight::Regular, x, y);
        }
        for line in lines.iter().skip(1) {
            let y = self.next_line(ENTRY_PT);
            self.text_at(line, ENTRY_PT, FontWeight::Bold, MARGIN_MM, y);
        }
    }

    fn rule(&mut self) {
        self.reserve(2.0);
        let y = self.cursor - 1.0;
        self.layer.set_outline_color(Color::Greyscale(Greyscale::new(0.55, None)));
        self.layer.set_outline_thickness(0.6);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(y)), false),
                (Point::new(Mm(self.width - MARGIN_MM), Mm(y)), false),
            ],
            is_closed: false,
        });
        self.cursor -= 2.0;
    }

    fn gap(&mut self, height: f32) {
        self.cursor = (self.cursor - height).max(MARGIN_MM);
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        if self.replaced > 0 {
            tracing::warn!(
                replaced = self.replaced,
                "characters outside the builtin font encoding were substituted"
            );
        }
        self.doc
            .save_to_bytes()
            .map_err(|e| RenderError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        bundle::ResumeSections,
        certification::CertificationFields,
        experience::ExperienceFields,
        section::Section,
        skill::{SkillFields, SkillLevel},
    };
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn resume(title: &str) -> Resume {
        Resume {
            id: 42,
            uuid: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: title.into(),
            full_name: Some("Ada Lovelace".into()),
            professional_title: Some("Analytical Engineer".into()),
            email: Some("ada@example.com".into()),
            phone: Some("5551234567".into()),
            location: Some("London".into()),
            website_url: None,
            linkedin_url: None,
            github_url: Some("https://github.com/ada".into()),
            twitter_url: None,
            summary: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn section<F>(id: i64, fields: F) -> Section<F> {
        Section { id, resume_id: 42, fields, created_at: Utc::now(), updated_at: Utc::now() }
    }

    fn sample_bundle() -> ResumeBundle {
        let sections = ResumeSections {
            experience: vec![section(1, ExperienceFields {
                company: "Engines Ltd".into(),
                position: "Lead Engineer".into(),
                location: None,
                start_date: date(2021, 3),
                end_date: None,
                is_current: true,
                description: Some("Built X\n\nShipped Y\n".into()),
            })],
            certifications: vec![section(1, CertificationFields {
                name: "Rust Certified".into(),
                issuing_organization: "Ferris Foundation".into(),
                issue_date: date(2023, 5),
                expiration_date: None,
                credential_id: None,
                credential_url: None,
            })],
            ..Default::default()
        };
        ResumeBundle::new(resume("Backend Engineer"), sections)
    }

    fn section_titles(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::SectionTitle(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_sections_are_omitted() {
        let blocks = compose(&sample_bundle());
        assert_eq!(section_titles(&blocks), vec!["Experience", "Certifications"]);
    }

    #[test]
    fn header_uses_full_name_and_formatted_phone() {
        let blocks = compose(&sample_bundle());
        assert_eq!(blocks[0], Block::Name("Ada Lovelace".into()));
        assert!(blocks.contains(&Block::Contact("ada@example.com | (555) 123-4567 | London".into())));
    }

    #[test]
    fn current_role_renders_as_present_with_bullets() {
        let blocks = compose(&sample_bundle());
        assert!(blocks.contains(&Block::Entry { title: "Lead Engineer".into(), dates: "2021 - Present".into() }));
        assert!(blocks.contains(&Block::Bullet("Built X".into())));
        assert!(blocks.contains(&Block::Bullet("Shipped Y".into())));
    }

    #[test]
    fn skills_are_grouped_by_category() {
        let skill = |id, category: &str, name: &str| {
            section(id, SkillFields {
                name: name.into(),
                category: category.into(),
                level: SkillLevel::Expert,
                years_of_experience: None,
            })
        };
        let sections = ResumeSections {
            skills: vec![skill(1, "Languages", "Rust"), skill(2, "Languages", "Go"), skill(3, "", "Mentoring")],
            ..Default::default()
        };
        let blocks = compose(&ResumeBundle::new(resume("x"), sections));

        let paragraphs: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(paragraphs, vec!["Mentoring (Expert)", "Languages: Go (Expert), Rust (Expert)"]);
    }

    #[test]
    fn render_produces_a_pdf() {
        let bytes = DocumentRenderer::default().render(&sample_bundle()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_documents_spill_onto_more_pages() {
        let mut bundle = sample_bundle();
        bundle.resume.summary = Some("A long line of summary text that keeps going.\n".repeat(200));

        let renderer = DocumentRenderer::new(RenderOptions { paper: PaperSize::Letter });
        let long = renderer.render(&bundle).unwrap();
        let short = renderer.render(&sample_bundle()).unwrap();
        assert!(long.len() > short.len());
    }

    #[test]
    fn filename_replaces_spaces_and_appends_id() {
        assert_eq!(export_filename(&resume("Senior Backend Engineer")), "Senior_Backend_Engineer_42.pdf");
        assert_eq!(export_filename(&resume("C++ / Rust")), "C__Rust_42.pdf");
    }

    #[test]
    fn blank_title_falls_back_to_default_name() {
        assert_eq!(export_filename(&resume("   ")), "resume_42.pdf");
        assert_eq!(export_filename(&resume("???")), "resume_42.pdf");
    }

    #[test]
    fn utf8_filename_keeps_accented_letters() {
        let cv = resume("Résumé Développeur");
        assert_eq!(export_filename(&cv), "Rsum_Dveloppeur_42.pdf");
        assert_eq!(export_filename_utf8(&cv), "Résumé_Développeur_42.pdf");
        assert_eq!(export_filename_utf8(&resume("Senior Engineer")), "Senior_Engineer_42.pdf");
        assert_eq!(export_filename_utf8(&resume("李雷")), "李雷_42.pdf");
        assert_eq!(export_filename_utf8(&resume("  ")), "resume_42.pdf");
    }

    #[test]
    fn text_outside_win_ansi_is_substituted_and_counted() {
        assert_eq!(win_ansi_text("Café “quoted” – 5 €"), ("Café “quoted” – 5 €".to_string(), 0));
        assert_eq!(win_ansi_text("Łukasz Żółć 李雷 José"), ("Lukasz Zółc ?? José".to_string(), 6));
        assert_eq!(win_ansi_text("a\u{00A0}b\u{00AD}c\td"), ("a bc d".to_string(), 0));
    }

    #[test]
    fn rendered_text_keeps_visible_placeholders_for_unsupported_glyphs() {
        let mut bundle = sample_bundle();
        bundle.resume.full_name = Some("Łukasz Żółć 李雷 José".into());
        let bytes = DocumentRenderer::default().render(&bundle).unwrap();

        // Builtin-font text is written as a hex string of WinAnsi codes.
        let encoded: String = b"Lukasz Z\xF3lc ?? Jos\xE9".iter().map(|b| format!("{:02X}", b)).collect();
        let needle = format!("<{}>", encoded);
        assert!(
            bytes.windows(needle.len()).any(|w| w == needle.as_bytes()),
            "content stream is missing {}",
            needle
        );
    }
}
