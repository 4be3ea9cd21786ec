//! Create forms and detail views per section

use std::sync::Arc;

use crate::controller::modal::{DetailView, Form, FormField, ModalContent, SubmitHandler};
use crate::core::{DetailTab, DomainId, Record, SectionId, TabGroup};

/// Builds the save handler for a section's create form
pub trait FormBackend: Send + Sync {
    fn create_handler(&self, section: SectionId, domain: DomainId) -> Arc<dyn SubmitHandler>;
}

/// Blank create form for `section`, or `None` when it is read-only
pub fn create_form(section: SectionId) -> Option<Form> {
    use SectionId::*;

    let fields = match section {
        Dashboard | Analytics | Mail | Settings => return None,
        Tours => vec![
            FormField::new("title", "Title").required(),
            FormField::new("city", "City").required(),
            FormField::new("price", "Price").decimal().required(),
            FormField::new("duration_hours", "Duration (h)").decimal(),
            FormField::new("summary", "Summary"),
        ],
        Variants => vec![
            FormField::new("tour", "Tour").required(),
            FormField::new("name", "Name").required(),
            FormField::new("price", "Price").decimal().required(),
        ],
        Pricing => vec![
            FormField::new("tour", "Tour").required(),
            FormField::new("season", "Season").required(),
            FormField::new("price", "Price").decimal().required(),
        ],
        Cities => vec![
            FormField::new("name", "Name").required(),
            FormField::new("country", "Country").required(),
            FormField::new("description", "Description"),
        ],
        Categories => vec![
            FormField::new("name", "Name").required(),
            FormField::new("slug", "Slug"),
        ],
        Bookings => vec![
            FormField::new("tour", "Tour").required(),
            FormField::new("customer", "Customer").required(),
            FormField::new("date", "Date").required(),
            FormField::new("guests", "Guests").integer().value("1"),
        ],
        Reviews => vec![
            FormField::new("tour", "Tour").required(),
            FormField::new("rating", "Rating").integer().required(),
            FormField::new("comment", "Comment"),
        ],
        Customers | Users => vec![
            FormField::new("name", "Name").required(),
            FormField::new("email", "Email").required(),
            FormField::new("phone", "Phone"),
        ],
        Coupons => vec![
            FormField::new("code", "Code").required(),
            FormField::new("discount", "Discount %").decimal().required(),
            FormField::new("expires", "Expires"),
        ],
        Collections => vec![
            FormField::new("name", "Name").required(),
            FormField::new("tours", "Tours"),
        ],
        Countries => vec![
            FormField::new("name", "Name").required(),
            FormField::new("code", "ISO code").required(),
        ],
        Currencies => vec![
            FormField::new("code", "Code").required(),
            FormField::new("symbol", "Symbol"),
            FormField::new("rate", "Rate").decimal(),
        ],
        Banners => vec![
            FormField::new("title", "Title").required(),
            FormField::new("image_url", "Image URL").required(),
            FormField::new("link", "Link"),
        ],
        Partners => vec![
            FormField::new("name", "Name").required(),
            FormField::new("website", "Website"),
            FormField::new("commission", "Commission %").decimal(),
        ],
        Faqs => vec![
            FormField::new("question", "Question").required(),
            FormField::new("answer", "Answer").required(),
        ],
    };
    Some(Form::new(fields))
}

pub fn create_title(section: SectionId) -> String {
    format!("Add {}", singular(section))
}

/// Detail view of a loaded record; tours, cities and categories get tabs
pub fn detail_content(section: SectionId, record: &Record) -> ModalContent {
    let tabs = matches!(
        section,
        SectionId::Tours | SectionId::Cities | SectionId::Categories
    )
    .then(TabGroup::<DetailTab>::new);
    ModalContent::Detail(DetailView {
        record: record.clone(),
        tabs,
    })
}

pub fn detail_title(section: SectionId, record: &Record) -> String {
    format!("{}: {}", singular(section), record.label())
}

fn singular(section: SectionId) -> &'static str {
    use SectionId::*;

    match section {
        Dashboard => "Dashboard",
        Tours => "Tour",
        Variants => "Variant",
        Pricing => "Price",
        Cities => "City",
        Categories => "Category",
        Bookings => "Booking",
        Reviews => "Review",
        Customers => "Customer",
        Mail => "Message",
        Coupons => "Coupon",
        Collections => "Collection",
        Countries => "Country",
        Currencies => "Currency",
        Banners => "Banner",
        Partners => "Partner",
        Faqs => "FAQ",
        Users => "User",
        Analytics => "Report",
        Settings => "Setting",
    }
}
