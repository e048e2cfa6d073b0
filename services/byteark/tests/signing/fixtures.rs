// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use anyhow::Result;
use arksign_byteark::{SignOptions, SignedUrl};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::{init_signer, EXPIRE, URL};

#[test_case(&[], "cLwtn96a-YPY7jt8ZKSf_Q"; "plain")]
#[test_case(&[("method", "HEAD")], "QULE8DQ08f8fhFC-1gDUWQ"; "method override")]
#[test_case(&[("path_prefix", "/video-objects/QDuxJm02TYqJ/")], "334wInm0jKfC6LCm23zndA"; "path prefix")]
#[test_case(&[("client_ip", "103.253.132.65")], "Gr9T_ZdHDy8l8CCPxpFjNg"; "client ip")]
#[test_case(&[("client-ip", "103.253.132.65")], "Gr9T_ZdHDy8l8CCPxpFjNg"; "dashed client ip")]
#[test_case(&[("Client-IP", "103.253.132.65")], "Gr9T_ZdHDy8l8CCPxpFjNg"; "mixed case client ip")]
#[test_case(&[("geo_block", "TH"), ("origin", "https://a.com")], "cLwtn96a-YPY7jt8ZKSf_Q"; "echo only options")]
fn test_signature_fixtures(options: &[(&str, &str)], expected: &str) {
    let options = SignOptions::from_pairs(options.iter().copied()).expect("options must be valid");

    let signed = init_signer()
        .sign(URL, EXPIRE, &options)
        .expect("sign must success");
    let parsed = SignedUrl::parse(&signed).expect("signed url must parse");
    assert_eq!(parsed.signature, expected);
}

#[test]
fn test_sign_plain_url() -> Result<()> {
    let signed = init_signer().sign(URL, EXPIRE, &SignOptions::new())?;

    assert_eq!(
        signed,
        "http://inox.qoder.byteark.com/video-objects/QDuxJm02TYqJ/playlist.m3u8\
         ?x_ark_access_id=2Aj6Wkge4hi1ZYLp0DBG\
         &x_ark_auth_type=ark-v2\
         &x_ark_expires=1514764800\
         &x_ark_signature=cLwtn96a-YPY7jt8ZKSf_Q"
    );
    Ok(())
}

#[test]
fn test_sign_with_path_prefix() -> Result<()> {
    let signed = init_signer().sign(
        URL,
        EXPIRE,
        &SignOptions::new().with_path_prefix("/video-objects/QDuxJm02TYqJ/"),
    )?;

    assert_eq!(
        signed,
        "http://inox.qoder.byteark.com/video-objects/QDuxJm02TYqJ/playlist.m3u8\
         ?x_ark_access_id=2Aj6Wkge4hi1ZYLp0DBG\
         &x_ark_auth_type=ark-v2\
         &x_ark_expires=1514764800\
         &x_ark_path_prefix=%2Fvideo-objects%2FQDuxJm02TYqJ%2F\
         &x_ark_signature=334wInm0jKfC6LCm23zndA"
    );
    Ok(())
}

#[test]
fn test_sign_with_client_ip() -> Result<()> {
    let signed = init_signer().sign(
        URL,
        EXPIRE,
        &SignOptions::from_pairs([("client-ip", "103.253.132.65")])?,
    )?;

    assert_eq!(
        signed,
        "http://inox.qoder.byteark.com/video-objects/QDuxJm02TYqJ/playlist.m3u8\
         ?x_ark_access_id=2Aj6Wkge4hi1ZYLp0DBG\
         &x_ark_auth_type=ark-v2\
         &x_ark_client_ip=1\
         &x_ark_expires=1514764800\
         &x_ark_signature=Gr9T_ZdHDy8l8CCPxpFjNg"
    );
    Ok(())
}

#[test]
fn test_sign_host_only_url() -> Result<()> {
    let signed = init_signer().sign("http://inox.qoder.byteark.com", EXPIRE, &SignOptions::new())?;

    assert_eq!(
        signed,
        "http://inox.qoder.byteark.com\
         ?x_ark_access_id=2Aj6Wkge4hi1ZYLp0DBG\
         &x_ark_auth_type=ark-v2\
         &x_ark_expires=1514764800\
         &x_ark_signature=JoVT7lNcjeHlmRv29A-8GQ"
    );
    assert_eq!(SignedUrl::parse(&signed)?.path, "");
    Ok(())
}

#[test]
fn test_sign_is_deterministic() -> Result<()> {
    let signer = init_signer();
    let options = SignOptions::new()
        .with_path_prefix("/video-objects/")
        .with_user_agent("Mozilla/5.0")
        .with_request_tags("a,b");

    let first = signer.sign(URL, EXPIRE, &options)?;
    for _ in 0..8 {
        assert_eq!(signer.sign(URL, EXPIRE, &options)?, first);
    }
    Ok(())
}

#[test]
fn test_key_normalization_gives_identical_urls() -> Result<()> {
    let signer = init_signer();

    let dashed = signer.sign(
        URL,
        EXPIRE,
        &SignOptions::from_pairs([("client-ip", "103.253.132.65"), ("User-Agent", "curl")])?,
    )?;
    let underscored = signer.sign(
        URL,
        EXPIRE,
        &SignOptions::from_pairs([("client_ip", "103.253.132.65"), ("user_agent", "curl")])?,
    )?;

    assert_eq!(dashed, underscored);
    Ok(())
}
