#[rocket::launch]
fn rocket() -> _ {
	pbi_embed_server::server(rocket::build())
}
