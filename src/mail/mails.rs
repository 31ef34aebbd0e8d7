use super::sendmail::Mailer;

/// Welcome notice sent to a freshly registered user, carrying their issued
/// referral code.
pub async fn send_welcome_email(
    mailer: &Mailer,
    to_email: &str,
    name: &str,
    referral_code: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = "Welcome to Referly 🎉";
    let template_path = "src/mail/templates/Welcome-email.html";
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{referral_code}}".to_string(), referral_code.to_string()),
    ];

    mailer.send_email(to_email, subject, template_path, &placeholders).await
}

/// Notice to a referrer that someone signed up with their code.
pub async fn send_referral_success_email(
    mailer: &Mailer,
    to_email: &str,
    referrer_name: &str,
    referee_name: &str,
    referral_code: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = "You've Referred a New User! 🎁";
    let template_path = "src/mail/templates/Referral-Success.html";
    let placeholders = vec![
        ("{{referrer_name}}".to_string(), referrer_name.to_string()),
        ("{{referee_name}}".to_string(), referee_name.to_string()),
        ("{{referral_code}}".to_string(), referral_code.to_string()),
    ];

    mailer.send_email(to_email, subject, template_path, &placeholders).await
}

/// Reminder mail carrying the user's own code and a ready-made signup link.
pub async fn send_referral_reminder_email(
    mailer: &Mailer,
    to_email: &str,
    name: &str,
    referral_code: &str,
    register_link: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = format!("Welcome {}", name);
    let template_path = "src/mail/templates/Referral-Reminder.html";
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{referral_code}}".to_string(), referral_code.to_string()),
        ("{{register_link}}".to_string(), register_link.to_string()),
    ];

    mailer.send_email(to_email, &subject, template_path, &placeholders).await
}

/// Broadcast body supplied by the caller; subject and message are free-form.
pub async fn send_campaign_broadcast_email(
    mailer: &Mailer,
    to_email: &str,
    subject: &str,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let template_path = "src/mail/templates/Campaign-Broadcast.html";
    let placeholders = vec![("{{message}}".to_string(), message.to_string())];

    mailer.send_email(to_email, subject, template_path, &placeholders).await
}
