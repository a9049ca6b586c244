use std::{env, error::Error};

fn main() -> Result<(), Box<dyn Error>> {
    let host = env::var("HOST").expect("missing envvar HOST");
    let user = env::var("MAILUSER").expect("missing envvar MAILUSER");
    let password = env::var("PASSWORD").expect("missing envvar PASSWORD");

    let client = pop3::ClientBuilder::new(host.as_str(), 995).rustls()?;
    let mut session = client.login(&user, &password).map_err(|e| e.0)?;

    // list unique-ids so a caller could skip already-seen messages on the
    // next run
    for entry in session.uidl_all()? {
        println!("message {} has unique-id {}", entry.id, entry.uid);
    }

    session.quit()?;
    Ok(())
}
