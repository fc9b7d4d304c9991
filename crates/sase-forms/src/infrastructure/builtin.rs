//! Built-in form definitions

use crate::domain::value_objects::{FieldSpec, FieldType};

const US_STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia",
    "Wisconsin", "Wyoming",
];

/// `(form type, title, fields)` in menu order
pub(crate) fn definitions() -> Vec<(&'static str, &'static str, Vec<FieldSpec>)> {
    vec![
        ("userInfo", "User Information", user_info()),
        ("address", "Address Information", address()),
        ("payment", "Payment Information", payment()),
        ("jobApplication", "Job Application", job_application()),
        ("survey", "Survey", survey()),
        ("contactForm", "Contact Form", contact_form()),
    ]
}

fn user_info() -> Vec<FieldSpec> {
    use FieldType::*;
    vec![
        FieldSpec::new("firstName", Text, "First Name").required(),
        FieldSpec::new("lastName", Text, "Last Name").required(),
        FieldSpec::new("age", Number, "Age"),
        FieldSpec::new("email", Email, "Email").required(),
        FieldSpec::new("phone", Tel, "Phone Number"),
        FieldSpec::new("birthDate", Date, "Date of Birth").required(),
        FieldSpec::new("gender", Radio, "Gender")
            .required()
            .with_options(&["Male", "Female", "Other", "Prefer not to say"]),
        FieldSpec::new("interests", Checkbox, "Interests")
            .with_options(&["Sports", "Music", "Reading", "Travel", "Technology"]),
    ]
}

fn address() -> Vec<FieldSpec> {
    use FieldType::*;
    vec![
        FieldSpec::new("street", Text, "Street Address").required(),
        FieldSpec::new("apartment", Text, "Apartment/Suite"),
        FieldSpec::new("city", Text, "City").required(),
        FieldSpec::new("state", Dropdown, "State").required().with_options(US_STATES),
        FieldSpec::new("zipCode", Text, "Zip Code").required(),
        FieldSpec::new("country", Dropdown, "Country")
            .required()
            .with_options(&["United States", "Canada", "Mexico"]),
        FieldSpec::new("addressType", Radio, "Address Type")
            .required()
            .with_options(&["Home", "Work", "Other"]),
        FieldSpec::new("deliveryInstructions", Textarea, "Delivery Instructions"),
    ]
}

fn payment() -> Vec<FieldSpec> {
    use FieldType::*;
    vec![
        FieldSpec::new("cardholderName", Text, "Cardholder Name").required(),
        FieldSpec::new("cardNumber", Text, "Card Number").required(),
        FieldSpec::new("expiryDate", Month, "Expiry Date").required(),
        FieldSpec::new("cvv", Password, "CVV").required(),
        FieldSpec::new("cardType", Radio, "Card Type")
            .required()
            .with_options(&["Credit", "Debit"]),
        FieldSpec::new("saveCard", Checkbox, "Save card for future payments"),
        FieldSpec::new("billingAddressSame", Checkbox, "Billing address same as shipping"),
    ]
}

fn job_application() -> Vec<FieldSpec> {
    use FieldType::*;
    vec![
        FieldSpec::new("position", Dropdown, "Position").required().with_options(&[
            "Software Engineer",
            "Product Manager",
            "UX Designer",
            "Data Scientist",
            "DevOps Engineer",
        ]),
        FieldSpec::new("department", Dropdown, "Department")
            .required()
            .with_options(&["Engineering", "Product", "Design", "Data", "Operations"]),
        FieldSpec::new("experience", Number, "Years of Experience").required(),
        FieldSpec::new("resume", File, "Resume").required().accept(".pdf,.doc,.docx"),
        FieldSpec::new("coverLetter", File, "Cover Letter").accept(".pdf,.doc,.docx"),
        FieldSpec::new("portfolio", Url, "Portfolio URL"),
        FieldSpec::new("startDate", Date, "Available Start Date").required(),
        FieldSpec::new("salaryExpectation", Number, "Expected Annual Salary").required(),
        FieldSpec::new("relocate", Radio, "Willing to Relocate")
            .required()
            .with_options(&["Yes", "No"]),
        FieldSpec::new("references", Textarea, "References"),
    ]
}

fn survey() -> Vec<FieldSpec> {
    use FieldType::*;
    vec![
        FieldSpec::new("satisfaction", Radio, "Overall Satisfaction")
            .required()
            .with_options(&[
                "Very Satisfied",
                "Satisfied",
                "Neutral",
                "Dissatisfied",
                "Very Dissatisfied",
            ]),
        FieldSpec::new("recommendationScore", Range, "How likely are you to recommend us? (0-10)")
            .required()
            .bounds("0", "10"),
        FieldSpec::new("usedFeatures", Checkbox, "Features Used")
            .required()
            .with_options(&[
                "Product Search",
                "Shopping Cart",
                "Wishlist",
                "Reviews",
                "Customer Support",
            ]),
        FieldSpec::new("improvements", Textarea, "Suggested Improvements"),
        FieldSpec::new("futureFeatures", Checkbox, "Features you'd like to see").with_options(&[
            "Mobile App",
            "Dark Mode",
            "Voice Search",
            "AI Recommendations",
            "Social Integration",
        ]),
        FieldSpec::new("feedbackCategory", Dropdown, "Feedback Category")
            .required()
            .with_options(&["User Interface", "Performance", "Features", "Support", "Other"]),
        FieldSpec::new("contactPermission", Checkbox, "May we contact you for follow-up?"),
    ]
}

fn contact_form() -> Vec<FieldSpec> {
    use FieldType::*;
    vec![
        FieldSpec::new("fullName", Text, "Full Name").required(),
        FieldSpec::new("email", Email, "Email Address").required(),
        FieldSpec::new("phone", Tel, "Phone Number"),
        FieldSpec::new("subject", Dropdown, "Subject").required().with_options(&[
            "General Inquiry",
            "Technical Support",
            "Billing Question",
            "Feature Request",
            "Bug Report",
        ]),
        FieldSpec::new("priority", Radio, "Priority Level")
            .required()
            .with_options(&["Low", "Medium", "High", "Urgent"]),
        FieldSpec::new("message", Textarea, "Message").required(),
        FieldSpec::new("attachments", File, "Attachments")
            .accept(".pdf,.jpg,.png,.zip")
            .multiple(),
        FieldSpec::new("preferredContact", Radio, "Preferred Contact Method")
            .required()
            .with_options(&["Email", "Phone"]),
        FieldSpec::new("newsletter", Checkbox, "Subscribe to newsletter"),
    ]
}
