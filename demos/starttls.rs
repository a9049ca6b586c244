use std::{env, error::Error};

fn main() -> Result<(), Box<dyn Error>> {
    let host = env::var("HOST").expect("missing envvar HOST");
    let user = env::var("MAILUSER").expect("missing envvar MAILUSER");
    let password = env::var("PASSWORD").expect("missing envvar PASSWORD");

    // connect in plaintext on the standard POP3 port, then upgrade with
    // STLS before any credentials go over the wire
    let client = pop3::ClientBuilder::new(host.as_str(), 110)
        .starttls()
        .native_tls()?;

    let mut session = client.login(&user, &password).map_err(|e| e.0)?;

    for info in session.list_all()? {
        println!("message {} is {} bytes", info.id, info.size);
    }

    session.quit()?;
    Ok(())
}
